//! Error Types

use thiserror::Error;

/// Result type alias for caption operations
pub type Result<T> = std::result::Result<T, CaptionError>;

/// Caption pipeline error types
#[derive(Error, Debug)]
pub enum CaptionError {
    /// Request failed validation before any outbound call
    #[error("Invalid request: {0}")]
    Validation(String),

    /// LLM provider returned a non-success response
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Upstream payload could not be parsed; `raw` carries the payload
    /// for diagnostics (surfaced only outside production)
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        raw: Option<String>,
    },

    /// Configuration error (missing credential etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl CaptionError {
    /// Convert to a user-friendly message (never leaks credentials)
    pub fn user_message(&self) -> String {
        match self {
            CaptionError::Validation(msg) => msg.clone(),
            CaptionError::Provider(msg) => {
                format!("The caption service encountered an error: {}", msg)
            }
            CaptionError::ProviderUnavailable(_) => {
                "The caption service is currently unavailable. Please try again.".into()
            }
            CaptionError::Parse { .. } => "The caption service returned an unexpected response.".into(),
            CaptionError::Config(_) => "Service configuration error.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for CaptionError {
    fn from(err: anyhow::Error) -> Self {
        CaptionError::Other(err.to_string())
    }
}
