//! Stripe Checkout Integration
//!
//! Implements the "Stripe Checkout (Hosted)" approach: sessions are created
//! server-side against a fixed subscription price id and the browser is
//! redirected to Stripe's hosted page.

use serde::{Deserialize, Serialize};
use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionMode, Client,
    CreateCheckoutSession, CreateCheckoutSessionLineItems,
};

use crate::error::{PaymentError, Result};
use crate::plan::Plan;

/// Mode encoded in a Stripe secret key prefix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    Test,
    Live,
}

impl KeyMode {
    /// Derive the mode from a secret key prefix
    pub fn from_secret_key(secret_key: &str) -> Option<Self> {
        if secret_key.starts_with("sk_test_") {
            Some(KeyMode::Test)
        } else if secret_key.starts_with("sk_live_") {
            Some(KeyMode::Live)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyMode::Test => "test",
            KeyMode::Live => "live",
        }
    }
}

/// Stripe client wrapper
pub struct StripeClient {
    client: Client,
    secret_key: String,
    price_pro: String,
    webhook_secret: String,
    expected_mode: Option<KeyMode>,
}

impl StripeClient {
    /// Create a new Stripe client
    pub fn new(
        secret_key: &str,
        price_pro: &str,
        webhook_secret: &str,
        expected_mode: Option<KeyMode>,
    ) -> Self {
        Self {
            client: Client::new(secret_key),
            secret_key: secret_key.to_string(),
            price_pro: price_pro.to_string(),
            webhook_secret: webhook_secret.to_string(),
            expected_mode,
        }
    }

    /// Create from environment variables.
    ///
    /// Requires `STRIPE_SECRET_KEY`, `STRIPE_PRICE_PRO`, and
    /// `STRIPE_WEBHOOK_SECRET`. `STRIPE_KEY_MODE` ("test" or "live")
    /// optionally pins the expected key mode so the server refuses to run
    /// against the wrong environment.
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| PaymentError::Config("STRIPE_SECRET_KEY not set".into()))?;
        let price_pro = std::env::var("STRIPE_PRICE_PRO")
            .map_err(|_| PaymentError::Config("STRIPE_PRICE_PRO not set".into()))?;
        let webhook_secret = std::env::var("STRIPE_WEBHOOK_SECRET")
            .map_err(|_| PaymentError::Config("STRIPE_WEBHOOK_SECRET not set".into()))?;

        let expected_mode = match std::env::var("STRIPE_KEY_MODE").ok().as_deref() {
            Some("test") => Some(KeyMode::Test),
            Some("live") => Some(KeyMode::Live),
            Some(other) => {
                return Err(PaymentError::Config(format!(
                    "STRIPE_KEY_MODE must be \"test\" or \"live\", got \"{}\"",
                    other
                )));
            }
            None => None,
        };

        Ok(Self::new(
            &secret_key,
            &price_pro,
            &webhook_secret,
            expected_mode,
        ))
    }

    /// Get the webhook secret
    pub fn webhook_secret(&self) -> &str {
        &self.webhook_secret
    }

    /// Sanity-check the secret key mode before talking to Stripe.
    ///
    /// An unrecognized prefix is a configuration error; so is a mismatch
    /// against the expected mode when one is configured.
    pub fn check_key_mode(&self) -> Result<KeyMode> {
        let mode = KeyMode::from_secret_key(&self.secret_key).ok_or_else(|| {
            PaymentError::Config("Secret key must start with sk_test_ or sk_live_".into())
        })?;

        if let Some(expected) = self.expected_mode {
            if mode != expected {
                return Err(PaymentError::KeyModeMismatch {
                    expected: expected.as_str(),
                    actual: mode.as_str(),
                });
            }
        }

        Ok(mode)
    }

    /// Create a hosted checkout session for a subscription plan.
    ///
    /// Returns a URL to redirect the user to Stripe's hosted checkout page.
    /// `origin` is the scheme+host of the incoming request and anchors the
    /// success/cancel redirects.
    pub async fn create_checkout_session(
        &self,
        plan: Plan,
        origin: &str,
    ) -> Result<CheckoutSession> {
        let mode = self.check_key_mode()?;

        // Plan::Pro is the only tier; all plans map to the fixed price id
        let price = match plan {
            Plan::Pro => self.price_pro.clone(),
        };

        let success_url = format!("{}/success?session_id={{CHECKOUT_SESSION_ID}}", origin);
        let cancel_url = format!("{}/cancel", origin);

        let mut params = CreateCheckoutSession::new();
        params.mode = Some(CheckoutSessionMode::Subscription);
        params.success_url = Some(&success_url);
        params.cancel_url = Some(&cancel_url);
        params.allow_promotion_codes = Some(true);
        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            price: Some(price),
            quantity: Some(1),
            ..Default::default()
        }]);

        let session = StripeCheckoutSession::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        let checkout_url = session
            .url
            .ok_or_else(|| PaymentError::Stripe("No checkout URL returned".into()))?;

        tracing::info!(
            session_id = %session.id,
            plan = %plan,
            mode = mode.as_str(),
            "Created checkout session"
        );

        Ok(CheckoutSession {
            id: session.id.to_string(),
            checkout_url,
        })
    }
}

/// Result of creating a checkout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Stripe session ID
    pub id: String,

    /// URL to redirect user to
    pub checkout_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mode_from_prefix() {
        assert_eq!(KeyMode::from_secret_key("sk_test_abc"), Some(KeyMode::Test));
        assert_eq!(KeyMode::from_secret_key("sk_live_abc"), Some(KeyMode::Live));
        assert_eq!(KeyMode::from_secret_key("pk_test_abc"), None);
    }

    #[test]
    fn test_unrecognized_prefix_rejected() {
        let client = StripeClient::new("bogus_key", "price_123", "whsec_x", None);
        assert!(matches!(
            client.check_key_mode(),
            Err(PaymentError::Config(_))
        ));
    }

    #[test]
    fn test_mode_mismatch_rejected() {
        let client = StripeClient::new("sk_test_abc", "price_123", "whsec_x", Some(KeyMode::Live));
        assert!(matches!(
            client.check_key_mode(),
            Err(PaymentError::KeyModeMismatch {
                expected: "live",
                actual: "test"
            })
        ));
    }

    #[test]
    fn test_matching_mode_accepted() {
        let client = StripeClient::new("sk_test_abc", "price_123", "whsec_x", Some(KeyMode::Test));
        assert_eq!(client.check_key_mode().unwrap(), KeyMode::Test);
    }
}
