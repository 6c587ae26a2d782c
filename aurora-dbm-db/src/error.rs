//! Error types for the store layer.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::store::StoreKind;

/// A stored cell that cannot be read as its column's type.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("missing column {column}")]
    MissingColumn { column: &'static str },

    #[error("column {column} is NULL")]
    Null { column: &'static str },

    #[error("column {column}: expected {expected}, found {found}")]
    WrongType {
        column: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("column {column}: value {value} does not fit in {expected}")]
    OutOfRange {
        column: &'static str,
        expected: &'static str,
        value: i64,
    },
}

/// Errors from opening, loading, saving or closing a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened or is not a SQLite database.
    #[error("Failed to open {kind} database {}: {source}", path.display())]
    Connect {
        kind: StoreKind,
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// An operation needed an open connection.
    #[error("The {0} database is not open")]
    NotOpen(StoreKind),

    /// The full-table load failed.
    #[error("Failed to load {table}: {source}")]
    Load {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A row did not match the column types the entity expects.
    #[error("Malformed record in {table}{}: {source}", row_id.map(|id| format!(" (Id={id})")).unwrap_or_default())]
    MalformedRecord {
        table: &'static str,
        row_id: Option<i64>,
        #[source]
        source: RowError,
    },

    /// A statement or batch failed; any transaction has been rolled back.
    #[error("Database operation failed ({context}): {source}")]
    Operation {
        context: String,
        #[source]
        source: rusqlite::Error,
    },

    /// An UPDATE matched no row; the whole batch was rolled back.
    #[error("No row with Id={id} in {table}; nothing was saved")]
    RowNotFound { table: &'static str, id: i64 },

    /// The driver kept refusing to close the connection.
    #[error("Timed out after {waited:?} closing the {kind} database: {source}")]
    CloseTimeout {
        kind: StoreKind,
        waited: Duration,
        #[source]
        source: rusqlite::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn operation(context: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Operation {
            context: context.into(),
            source,
        }
    }
}
