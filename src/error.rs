use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP {status} returned by {url}")]
    Http { url: String, status: u16 },

    #[error("Network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed dataset payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Cannot render load report: {0}")]
    Report(#[source] serde_json::Error),

    #[error("Cannot open region store at {}: {source}", path.display())]
    StorageInit {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Storage error during '{step}': {source}")]
    Storage {
        step: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Region table {table} does not exist; run `load` first")]
    MissingTable { table: &'static str },

    #[error("Invalid {field} '{value}' on record '{name}'")]
    InvalidCoordinate {
        name: String,
        field: &'static str,
        value: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl ProcessingError {
    pub(crate) fn storage(step: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| ProcessingError::Storage { step, source }
    }
}
