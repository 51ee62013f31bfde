use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AfiendError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Failed to encode alias {name:?}: {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode alias {name:?}: {source}")]
    Decode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid duration {input:?}: {reason}")]
    Parse { input: String, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment error: {0}")]
    Environment(String),
}

pub type Result<T> = std::result::Result<T, AfiendError>;
