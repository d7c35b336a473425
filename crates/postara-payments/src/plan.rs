//! Subscription Plans

use serde::{Deserialize, Serialize};

use crate::error::{PaymentError, Result};

/// Subscription plan
///
/// Only one paid tier exists today; unknown identifiers are rejected rather
/// than silently mapped to a default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Pro,
}

impl Plan {
    /// Parse a plan identifier from a request
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pro" => Ok(Plan::Pro),
            other => Err(PaymentError::UnknownPlan(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Pro => "pro",
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
