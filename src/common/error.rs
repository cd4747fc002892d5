use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing required environment variable {0}")]
    Config(&'static str),

    #[error("invalid job settings JSON in {origin}: {source}")]
    ConfigParse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("job settings are missing {0}")]
    Structural(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("failed to read packaged job settings {path}: {source}")]
    PackagedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("transcoding service error: {0}")]
    ExternalService(String),

    #[error("invalid trigger event: {0}")]
    InvalidEvent(&'static str),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
