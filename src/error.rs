//! The error types of the crate.

use std::fmt::Display;
use std::path::PathBuf;

use thiserror::Error;

use crate::testcase::Field;

/// The errors produced by the core operations on a collection.
///
/// All of them are recoverable: the presentation layer shows them to the user and the
/// collection is left exactly as it was before the failed operation.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// The directory to scan does not exist.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    /// A user-entered value does not parse as an integer.
    #[error("Field {field} requires an integer value (got {value:?})")]
    InvalidValue {
        /// The field the value was entered for.
        field: Field,
        /// The raw value, as entered.
        value: String,
    },
    /// A file or directory could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Adds methods for failing without panic. Like `expect` but without panic.
pub trait NiceError<T> {
    /// Fail exiting with `1` if the value is not present. Otherwise return the content.
    fn nice_unwrap(self) -> T;

    /// Fail exiting with `1` if the value is not present, printing to stderr the message.
    /// Otherwise return the content.
    fn nice_expect<S: Display + Send + Sync + 'static>(self, mex: S) -> T;
}

fn print_error(error: anyhow::Error) {
    debug!("{:?}", error);
    let mut fail: &dyn std::error::Error = error.as_ref();
    eprintln!("Error: {fail}");
    while let Some(cause) = fail.source() {
        eprintln!("\nCaused by:\n    {cause}");
        fail = cause;
    }
}

impl<T> NiceError<T> for Result<T, anyhow::Error> {
    fn nice_unwrap(self) -> T {
        match self {
            Ok(x) => x,
            Err(e) => {
                print_error(e);
                std::process::exit(1);
            }
        }
    }

    fn nice_expect<S: Display + Send + Sync + 'static>(self, mex: S) -> T {
        match self {
            Ok(x) => x,
            Err(e) => {
                print_error(e.context(mex));
                std::process::exit(1);
            }
        }
    }
}
