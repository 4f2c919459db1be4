//! # tcman
//!
//! Manager for the testcases of IOI-like tasks: scans a directory for matching
//! `name.in`/`name.ans` pairs, keeps them as an ordered collection annotated with
//! time limit, memory limit, score and subtask id, and exports/imports that
//! metadata through a small YAML-like exchange file.
//!
//! This is both an application and a library: the binary wraps the collection in
//! an interactive prompt, while the library exposes the collection operations,
//! the directory scanner and the exchange format for use in other tools.

#[macro_use]
extern crate log;

pub mod collection;
pub mod error;
pub mod format;
pub mod opt;
pub mod scan;
pub mod shell;
pub mod testcase;

pub use collection::TestcaseCollection;
pub use error::ManagerError;
pub use testcase::{Field, FieldPatch, TestcaseEntry};
