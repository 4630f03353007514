use crate::mt::MtError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised outside the translation service itself
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid input configuration or credentials
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Catalog content that cannot be translated (e.g. root is not an object)
    #[error("Invalid message catalog: {0}")]
    Catalog(String),

    #[error(transparent)]
    Translation(#[from] MtError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
