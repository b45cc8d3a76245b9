//! Error types for the record mapper.

use std::io;

/// Result type alias for mapper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the record mapper.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error.
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV read/write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Table does not exist (introspection returned no columns).
    #[error("No such table: {0}")]
    NoSuchTable(String),

    /// Record has no value for a column the table declares.
    #[error("Record has no column named {0:?}")]
    UnknownColumn(String),

    /// Update or delete called with an empty predicate.
    #[error("Refusing to run an update/delete with an empty predicate")]
    EmptyPredicate,

    /// A BLOB value cannot be written to CSV.
    #[error("Column {0:?} holds a BLOB value, which cannot be written to CSV")]
    BlobInCsv(String),
}
