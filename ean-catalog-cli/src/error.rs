use ean_catalog_import::IngestError;
use thiserror::Error;

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Database creation, indexing or reporting failed
    #[error("Database error: {0}")]
    Database(String),

    /// Loading aborted on a sink or read failure
    #[error("Import failed: {0}")]
    Import(#[from] IngestError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
