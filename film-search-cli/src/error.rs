use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be resolved
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog could not be opened or written
    #[error("Database error: {0}")]
    Database(String),

    /// Catalog import failed
    #[error("Import error: {0}")]
    Import(#[from] film_search_db::ImportError),

    /// Bad command-line input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
