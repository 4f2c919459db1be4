//! The exchange file format of the collection.
//!
//! The exported file looks like YAML and by convention uses the `.yml`/`.yaml`
//! extension, but it is this tool's own restricted dialect: it is emitted and parsed by
//! hand, a general-purpose YAML parser may disagree on edge cases (names are written
//! without any escaping, so they are assumed to be simple file names without colons or
//! leading whitespace).
//!
//! For each testcase, in collection order, the exporter emits a block:
//!
//! ```text
//! 001.in:
//!   timeLimit: 2000
//!   memoryLimit: 1048576
//!   score: 0
//!   subtaskId: 0
//!
//! ```
//!
//! Exactly two spaces of indentation, the fields always in this order, one blank line
//! after every block (the last one included).
//!
//! The importer reads the same dialect permissively, line by line:
//!
//! - blank lines and lines whose trimmed content starts with `#` are skipped;
//! - a line with no leading whitespace is a top-level key: the text before the first
//!   `:`, trimmed, becomes the current name. Without a `:`, or with an empty key, the
//!   current name becomes undefined and the following indented lines are ignored until
//!   the next valid key. A key reappearing later merges into its first occurrence, the
//!   order keeps only the first position;
//! - a line with leading whitespace under a defined current name and containing a `:`
//!   contributes a raw field value (integer conversion happens only at reconciliation
//!   time).
//!
//! Reconciliation ([`apply_import`]) matches the imported names against a live
//! collection: unknown names are reported and skipped (the importer never creates
//! entries), values that do not parse as integers are reported and the previous value
//! is kept. Per-field failures never abort the import. Reordering the collection to
//! the imported order is a separate, caller-confirmed step ([`matched_order`] +
//! [`TestcaseCollection::reorder_by_names`]).
//!
//! [`TestcaseCollection::reorder_by_names`]: crate::TestcaseCollection::reorder_by_names

mod export;
mod import;

pub use export::export_collection;
pub use import::{apply_import, matched_order, parse_import, ImportFile, ImportReport, InvalidValue};
