//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Stripe API error
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Webhook signature verification failed
    #[error("Webhook signature invalid: {0}")]
    WebhookSignature(String),

    /// Webhook payload parsing failed
    #[error("Webhook parse error: {0}")]
    WebhookParse(String),

    /// Unknown plan identifier in a checkout request
    #[error("Unknown plan: {0}")]
    UnknownPlan(String),

    /// Secret key mode does not match the expected environment
    #[error("Stripe key mode mismatch: expected {expected}, key is {actual}")]
    KeyModeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Get user-friendly message (never includes credentials)
    pub fn user_message(&self) -> &str {
        match self {
            PaymentError::Stripe(_) => "Payment processing failed. Please try again.",
            PaymentError::UnknownPlan(_) => "That plan is not available.",
            PaymentError::WebhookSignature(_) => "Invalid webhook signature.",
            PaymentError::Config(_) | PaymentError::KeyModeMismatch { .. } => {
                "Service configuration error."
            }
            _ => "An error occurred processing your request.",
        }
    }
}
