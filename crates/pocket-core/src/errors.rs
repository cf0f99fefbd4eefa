use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Generator error: {0}")]
    Generator(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Asset error at {}: {reason}", path.display())]
    Asset { path: PathBuf, reason: String },

    #[error("Vocab error: {0}")]
    Vocab(String),
}

impl ChatError {
    pub(crate) fn asset<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        ChatError::Asset {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
