use aurora_dbm_core::NumberParseError;
use aurora_dbm_db::StoreError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Store operation failed
    #[error("Database error: {0}")]
    Database(#[from] StoreError),

    /// A value given on the command line could not be parsed
    #[error("Invalid value for {field}: {source}")]
    InvalidValue {
        field: String,
        #[source]
        source: NumberParseError,
    },

    /// No row with the requested id
    #[error("No {kind} with id {id}")]
    NotFound { kind: &'static str, id: i64 },

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn invalid_value(field: impl Into<String>, source: NumberParseError) -> Self {
        Self::InvalidValue {
            field: field.into(),
            source,
        }
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
