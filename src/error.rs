//! Crate-wide error type.
//!
//! Three failure categories surface to callers:
//! - `Parse`: malformed temporal input (weekday token, clock time, date)
//! - `Lookup`: an invalid course/section reference
//! - `Index`: an out-of-range request against a result set
//!
//! Empty result sets and truncated enumerations are *not* errors; they
//! are reported through [`Generated`](crate::generator::Generated) and
//! the evaluator's `is_empty`.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by parsing, lookup, and result-set access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed temporal input: weekday token, clock time, or date.
    #[error("malformed time input: {0}")]
    Parse(String),

    /// Reference to a course or section that does not exist.
    #[error("unknown section {index} of course {course}")]
    Lookup {
        /// Course key as supplied by the caller.
        course: String,
        /// Offending section index.
        index: usize,
    },

    /// Reference to a course missing from the catalog.
    #[error("unknown course {0}")]
    UnknownCourse(String),

    /// Out-of-range access into an evaluator's result set.
    #[error("index {index} out of range for {len} combinations")]
    Index {
        /// Requested index.
        index: usize,
        /// Size of the result set.
        len: usize,
    },
}

impl Error {
    /// Creates a parse error from any displayable context.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
