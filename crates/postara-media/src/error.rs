//! Media Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, MediaError>;

/// Errors from the media storage and posting clients
#[derive(Error, Debug)]
pub enum MediaError {
    /// Request failed validation before any outbound call
    #[error("Invalid request: {0}")]
    Validation(String),

    /// No file present in the request
    #[error("No file received")]
    NoFile,

    /// File exceeds the configured ceiling
    #[error("File too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: u64 },

    /// Storage upload failed upstream
    #[error("Upload error: {0}")]
    Upload(String),

    /// Multi-network post failed upstream
    #[error("Post error: {0}")]
    Post(String),

    /// Configuration error (missing credential etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            MediaError::Validation(msg) => msg.clone(),
            MediaError::NoFile => "No file received.".into(),
            MediaError::TooLarge { max, .. } => {
                format!("File too large. Maximum size is {} bytes.", max)
            }
            MediaError::Upload(msg) => format!("Upload failed: {}", msg),
            MediaError::Post(msg) => format!("Posting failed: {}", msg),
            MediaError::Config(_) => "Service configuration error.".into(),
            _ => "An error occurred processing your request.".into(),
        }
    }
}
