//! # postara-payments
//!
//! Stripe integration for postara subscriptions.
//!
//! ## Checkout (Hosted)
//!
//! **Flow:** Your site → Redirect to Stripe's hosted page → Redirect back
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌─────────────┐
//! │  Your Site  │────▶│  Stripe Hosted  │────▶│  Your Site  │
//! │  (pricing)  │     │  Checkout Page  │     │  (success)  │
//! └─────────────┘     └─────────────────┘     └─────────────┘
//! ```
//!
//! Sessions are pinned to a fixed subscription price id; all session and
//! subscription state lives with Stripe.
//!
//! ## Webhooks
//!
//! Inbound events are verified against the shared webhook secret using
//! HMAC-SHA256 over the raw request body, then branched on event type and
//! logged. No local state is mutated; this is an observability sink.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use postara_payments::{Plan, StripeClient};
//!
//! let client = StripeClient::from_env()?;
//! let session = client
//!     .create_checkout_session(Plan::Pro, "https://postara.example")
//!     .await?;
//! // Redirect user to: session.checkout_url
//! ```

mod checkout;
mod error;
mod plan;
mod webhook;

pub use checkout::{CheckoutSession, KeyMode, StripeClient};
pub use error::{PaymentError, Result};
pub use plan::Plan;
pub use webhook::{WebhookEvent, WebhookHandler, WebhookVerifier};
