//! Application State

use std::sync::Arc;

use postara_core::CaptionEngine;
use postara_media::{AyrshareClient, CloudinaryClient};
use postara_payments::StripeClient;

/// Shared application state
///
/// Every client is optional: a missing credential leaves the slot `None`
/// and the corresponding endpoint returns a configuration error.
#[derive(Clone)]
pub struct AppState {
    /// Caption engine (None if the LLM credential is not configured)
    pub engine: Option<Arc<CaptionEngine>>,

    /// Cloudinary upload client
    pub cloudinary: Option<Arc<CloudinaryClient>>,

    /// Ayrshare posting client
    pub ayrshare: Option<Arc<AyrshareClient>>,

    /// Stripe client
    pub stripe: Option<Arc<StripeClient>>,

    /// Production-like environment: suppresses raw upstream payloads in
    /// error responses
    pub production: bool,
}
