use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupted data under key {key}")]
    Corrupted { key: String },

    #[error("Invalid storage key: {key}")]
    InvalidKey { key: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Write lane closed for key {key}")]
    LaneClosed { key: String },
}

impl SaveError {
    /// Whether retrying the same operation later can succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SaveError::Io(_) => true,
            SaveError::Unavailable(_) => true,
            SaveError::LaneClosed { .. } => true,
            SaveError::Json(_) => false,
            SaveError::Corrupted { .. } => false,
            SaveError::InvalidKey { .. } => false,
        }
    }
}
