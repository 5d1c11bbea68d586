//! Error types for STAR table parsing, manipulation and serialization.
//!
//! Every structural problem is surfaced to the caller as a [`StarError`]; nothing
//! in the parsing path is swallowed or retried. The only deliberately permissive
//! operation is [`Table::remove_columns`](crate::Table::remove_columns), which
//! ignores names that are not present.

use crate::column::ColumnType;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for emtable operations.
pub type Result<T> = std::result::Result<T, StarError>;

/// Error kinds raised while reading, transforming or writing STAR tables.
#[derive(Debug, Error)]
pub enum StarError {
    /// Underlying read or write failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be opened or created.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        /// Path that failed to open
        path: PathBuf,
        /// The originating I/O error
        #[source]
        source: std::io::Error,
    },

    /// The requested `data_<name>` line never appeared before the end of the source.
    #[error("block 'data_{name}' was not found")]
    BlockNotFound {
        /// Requested block name (empty for the anonymous block)
        name: String,
    },

    /// Label lines of a block are inconsistent.
    #[error("malformed header at line {line}: {reason}")]
    MalformedHeader {
        /// 1-based line number of the offending label
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A data line does not carry one field per declared column.
    #[error("corrupt data at line {line}: expected {expected} fields, found {actual}")]
    FieldCountMismatch {
        /// 1-based line number of the data line (0 for in-memory rows)
        line: usize,
        /// Number of declared columns
        expected: usize,
        /// Number of fields present
        actual: usize,
    },

    /// A value cannot be represented with the type of its column.
    #[error("value '{value}' of column '{column}' is not a valid {expected}")]
    TypeMismatch {
        /// Column name
        column: String,
        /// Offending value as text
        value: String,
        /// Type the column requires
        expected: ColumnType,
    },

    /// The operation is not allowed in the table's current mode.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Two columns would share a name (explicit construction or a derived column).
    #[error("column conflict: {0}")]
    ColumnConflict(String),

    /// A derived-column spec is not of the form `name=expr`.
    #[error("invalid column spec '{0}', expected name=expr")]
    InvalidColumnSpec(String),

    /// A referenced column does not exist.
    #[error("column '{0}' does not exist")]
    MissingColumn(String),
}

impl StarError {
    pub(crate) fn invalid_state(msg: impl Into<String>) -> Self {
        StarError::InvalidState(msg.into())
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        StarError::MalformedHeader {
            line,
            reason: reason.into(),
        }
    }
}
