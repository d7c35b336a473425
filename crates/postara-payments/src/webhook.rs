//! Stripe Webhook Handling
//!
//! Verifies the `Stripe-Signature` header against the shared secret and the
//! raw request body, then branches on event type and logs the subscription
//! lifecycle fact. No local state is mutated.
//!
//! Signature scheme: the header carries `t=<unix>,v1=<hex hmac>` where the
//! HMAC-SHA256 input is `"{t}.{raw_body}"` keyed by the webhook secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{PaymentError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Default tolerance for the signed timestamp, in seconds
const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Parsed webhook event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WebhookEvent {
    /// Checkout completed for a new subscription
    CheckoutCompleted {
        session_id: String,
        subscription_id: Option<String>,
        customer_email: Option<String>,
    },

    /// Subscription created
    SubscriptionCreated {
        subscription_id: String,
        status: String,
    },

    /// Subscription updated (plan or status change)
    SubscriptionUpdated {
        subscription_id: String,
        status: String,
    },

    /// Subscription cancelled
    SubscriptionDeleted { subscription_id: String },

    /// Unhandled event type, acknowledged but not acted on
    Other { event_type: String },
}

/// Raw-body signature verifier
pub struct WebhookVerifier {
    secret: String,
    tolerance_secs: i64,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Override the timestamp tolerance (0 disables the check)
    pub fn with_tolerance(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Verify a signature header against the raw payload.
    ///
    /// Uses constant-time comparison via the HMAC verifier. Any `v1`
    /// candidate in the header may match.
    pub fn verify(&self, payload: &str, signature_header: &str) -> Result<()> {
        let mut timestamp: Option<i64> = None;
        let mut candidates: Vec<&str> = Vec::new();

        for part in signature_header.split(',') {
            match part.trim().split_once('=') {
                Some(("t", value)) => {
                    timestamp = value.parse().ok();
                }
                Some(("v1", value)) => candidates.push(value),
                _ => {}
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| PaymentError::WebhookSignature("Missing timestamp".into()))?;
        if candidates.is_empty() {
            return Err(PaymentError::WebhookSignature(
                "Missing v1 signature".into(),
            ));
        }

        if self.tolerance_secs > 0 {
            let age = (chrono::Utc::now().timestamp() - timestamp).abs();
            if age > self.tolerance_secs {
                return Err(PaymentError::WebhookSignature(format!(
                    "Timestamp outside tolerance ({}s)",
                    age
                )));
            }
        }

        let signed_payload = format!("{}.{}", timestamp, payload);

        for candidate in candidates {
            let Ok(candidate_bytes) = hex::decode(candidate) else {
                continue;
            };

            let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
                .map_err(|e| PaymentError::WebhookSignature(e.to_string()))?;
            mac.update(signed_payload.as_bytes());

            if mac.verify_slice(&candidate_bytes).is_ok() {
                return Ok(());
            }
        }

        Err(PaymentError::WebhookSignature(
            "No matching signature".into(),
        ))
    }
}

/// Webhook handler: verify, parse, log
pub struct WebhookHandler {
    verifier: WebhookVerifier,
}

impl WebhookHandler {
    pub fn new(webhook_secret: &str) -> Self {
        Self {
            verifier: WebhookVerifier::new(webhook_secret),
        }
    }

    pub fn with_verifier(verifier: WebhookVerifier) -> Self {
        Self { verifier }
    }

    /// Verify the signature and parse the event from the raw body
    pub fn parse_event(&self, payload: &str, signature_header: &str) -> Result<WebhookEvent> {
        self.verifier.verify(payload, signature_header)?;
        parse_webhook_event(payload)
    }

    /// Record the lifecycle fact carried by an event
    pub fn handle(&self, event: &WebhookEvent) {
        match event {
            WebhookEvent::CheckoutCompleted {
                session_id,
                subscription_id,
                customer_email,
            } => {
                tracing::info!(
                    session_id = %session_id,
                    subscription_id = ?subscription_id,
                    email = ?customer_email,
                    "Checkout completed"
                );
            }
            WebhookEvent::SubscriptionCreated {
                subscription_id,
                status,
            } => {
                tracing::info!(
                    subscription_id = %subscription_id,
                    status = %status,
                    "Subscription created"
                );
            }
            WebhookEvent::SubscriptionUpdated {
                subscription_id,
                status,
            } => {
                tracing::info!(
                    subscription_id = %subscription_id,
                    status = %status,
                    "Subscription updated"
                );
            }
            WebhookEvent::SubscriptionDeleted { subscription_id } => {
                tracing::info!(
                    subscription_id = %subscription_id,
                    "Subscription cancelled"
                );
            }
            WebhookEvent::Other { event_type } => {
                tracing::debug!(event_type = %event_type, "Unhandled webhook event");
            }
        }
    }
}

/// Parse a verified payload into our event type
fn parse_webhook_event(payload: &str) -> Result<WebhookEvent> {
    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| PaymentError::WebhookParse(format!("Invalid JSON: {}", e)))?;

    let event_type = value["type"]
        .as_str()
        .ok_or_else(|| PaymentError::WebhookParse("Missing event type".into()))?;
    let object = &value["data"]["object"];

    let str_field = |v: &serde_json::Value| v.as_str().map(String::from);

    match event_type {
        "checkout.session.completed" => Ok(WebhookEvent::CheckoutCompleted {
            session_id: str_field(&object["id"])
                .ok_or_else(|| PaymentError::WebhookParse("Session missing id".into()))?,
            subscription_id: str_field(&object["subscription"]),
            customer_email: str_field(&object["customer_email"])
                .or_else(|| str_field(&object["customer_details"]["email"])),
        }),

        "customer.subscription.created" => Ok(WebhookEvent::SubscriptionCreated {
            subscription_id: str_field(&object["id"])
                .ok_or_else(|| PaymentError::WebhookParse("Subscription missing id".into()))?,
            status: str_field(&object["status"]).unwrap_or_default(),
        }),

        "customer.subscription.updated" => Ok(WebhookEvent::SubscriptionUpdated {
            subscription_id: str_field(&object["id"])
                .ok_or_else(|| PaymentError::WebhookParse("Subscription missing id".into()))?,
            status: str_field(&object["status"]).unwrap_or_default(),
        }),

        "customer.subscription.deleted" => Ok(WebhookEvent::SubscriptionDeleted {
            subscription_id: str_field(&object["id"])
                .ok_or_else(|| PaymentError::WebhookParse("Subscription missing id".into()))?,
        }),

        other => Ok(WebhookEvent::Other {
            event_type: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";

    /// Sign a payload the way Stripe does
    fn sign(payload: &str, timestamp: i64, secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{}.{}", timestamp, payload).as_bytes());
        format!(
            "t={},v1={}",
            timestamp,
            hex::encode(mac.finalize().into_bytes())
        )
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    #[test]
    fn test_valid_signature_accepted() {
        let payload = r#"{"type":"ping"}"#;
        let header = sign(payload, now(), SECRET);

        let verifier = WebhookVerifier::new(SECRET);
        assert!(verifier.verify(payload, &header).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let payload = r#"{"type":"ping"}"#;
        let header = sign(payload, now(), "whsec_other");

        let verifier = WebhookVerifier::new(SECRET);
        assert!(matches!(
            verifier.verify(payload, &header),
            Err(PaymentError::WebhookSignature(_))
        ));
    }

    #[test]
    fn test_tampered_body_rejected() {
        let header = sign(r#"{"type":"ping"}"#, now(), SECRET);

        let verifier = WebhookVerifier::new(SECRET);
        assert!(verifier.verify(r#"{"type":"pong"}"#, &header).is_err());
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let payload = r#"{"type":"ping"}"#;
        let header = sign(payload, now() - 3600, SECRET);

        let verifier = WebhookVerifier::new(SECRET);
        assert!(verifier.verify(payload, &header).is_err());

        // Tolerance disabled: stale is fine
        let lenient = WebhookVerifier::new(SECRET).with_tolerance(0);
        assert!(lenient.verify(payload, &header).is_ok());
    }

    #[test]
    fn test_garbage_header_rejected() {
        let verifier = WebhookVerifier::new(SECRET);
        assert!(verifier.verify("{}", "not-a-signature").is_err());
        assert!(verifier.verify("{}", "t=abc,v1=zz").is_err());
    }

    #[test]
    fn test_checkout_completed_parsed() {
        let payload = r#"{
            "type": "checkout.session.completed",
            "data": {"object": {
                "id": "cs_test_123",
                "subscription": "sub_456",
                "customer_email": "user@example.com"
            }}
        }"#;
        let handler = WebhookHandler::new(SECRET);
        let header = sign(payload, now(), SECRET);

        let event = handler.parse_event(payload, &header).unwrap();
        assert_eq!(
            event,
            WebhookEvent::CheckoutCompleted {
                session_id: "cs_test_123".into(),
                subscription_id: Some("sub_456".into()),
                customer_email: Some("user@example.com".into()),
            }
        );
        handler.handle(&event);
    }

    #[test]
    fn test_subscription_lifecycle_parsed() {
        let handler = WebhookHandler::new(SECRET);

        for (event_type, expect_status) in [
            ("customer.subscription.created", true),
            ("customer.subscription.updated", true),
            ("customer.subscription.deleted", false),
        ] {
            let payload = format!(
                r#"{{"type":"{}","data":{{"object":{{"id":"sub_1","status":"active"}}}}}}"#,
                event_type
            );
            let header = sign(&payload, now(), SECRET);

            let event = handler.parse_event(&payload, &header).unwrap();
            match &event {
                WebhookEvent::SubscriptionCreated { status, .. }
                | WebhookEvent::SubscriptionUpdated { status, .. } => {
                    assert!(expect_status);
                    assert_eq!(status, "active");
                }
                WebhookEvent::SubscriptionDeleted { subscription_id } => {
                    assert!(!expect_status);
                    assert_eq!(subscription_id, "sub_1");
                }
                other => panic!("unexpected event: {:?}", other),
            }
            handler.handle(&event);
        }
    }

    #[test]
    fn test_unknown_event_acknowledged() {
        let payload = r#"{"type":"invoice.paid","data":{"object":{}}}"#;
        let handler = WebhookHandler::new(SECRET);
        let header = sign(payload, now(), SECRET);

        let event = handler.parse_event(payload, &header).unwrap();
        assert_eq!(
            event,
            WebhookEvent::Other {
                event_type: "invoice.paid".into()
            }
        );
    }

    #[test]
    fn test_bad_signature_means_no_event() {
        let payload = r#"{"type":"checkout.session.completed","data":{"object":{"id":"cs_1"}}}"#;
        let handler = WebhookHandler::new(SECRET);

        let result = handler.parse_event(payload, "t=1,v1=deadbeef");
        assert!(matches!(result, Err(PaymentError::WebhookSignature(_))));
    }
}
