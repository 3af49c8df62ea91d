//! CLI error types.

use quill_client::{ClientError, RequestError};
use quill_config::ConfigError;
use quill_export::ExportError;
use quill_history::HistoryError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Request(#[from] RequestError),

    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("{0}")]
    History(#[from] HistoryError),

    #[error("{0}")]
    Validation(String),
}
