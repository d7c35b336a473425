//! Ayrshare Posting Client
//!
//! Forwards one caption + optional media URL + platform list to Ayrshare's
//! multi-network post endpoint and returns the upstream result verbatim.

use serde::{Deserialize, Serialize};

use crate::error::{MediaError, Result};

const POST_ENDPOINT: &str = "https://app.ayrshare.com/api/post";

/// Request to publish one post across several networks
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPostRequest {
    /// Caption text
    pub post: String,

    /// Target platform identifiers, e.g. ["twitter", "facebook"]
    pub platforms: Vec<String>,

    /// Public media URLs to attach
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_urls: Option<Vec<String>>,

    /// Ayrshare profile keys, for multi-profile accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_keys: Option<Vec<String>>,
}

impl SocialPostRequest {
    /// Validate before any outbound call
    pub fn validate(&self) -> Result<()> {
        if self.post.trim().is_empty() {
            return Err(MediaError::Validation("Caption is required".into()));
        }
        if self.platforms.is_empty() {
            return Err(MediaError::Validation(
                "At least one platform is required".into(),
            ));
        }
        Ok(())
    }
}

/// Upstream result plus a local success flag
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SocialPostResponse {
    pub ok: bool,

    /// Upstream response body, passed through verbatim
    pub result: serde_json::Value,
}

/// Ayrshare client
pub struct AyrshareClient {
    client: reqwest::Client,
    api_key: String,
}

impl AyrshareClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create from the `AYRSHARE_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("AYRSHARE_API_KEY")
            .map_err(|_| MediaError::Config("AYRSHARE_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Publish one post across the requested platforms
    pub async fn post(&self, request: &SocialPostRequest) -> Result<SocialPostResponse> {
        request.validate()?;

        let response = self
            .client
            .post(POST_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let result: serde_json::Value = response.json().await?;

        if !status.is_success() {
            let detail = result["error"]
                .as_str()
                .map(String::from)
                .unwrap_or_else(|| format!("Upstream HTTP {}", status));
            return Err(MediaError::Post(detail));
        }

        tracing::info!(
            platforms = ?request.platforms,
            "Forwarded post to distribution API"
        );

        Ok(SocialPostResponse { ok: true, result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(post: &str, platforms: &[&str]) -> SocialPostRequest {
        SocialPostRequest {
            post: post.into(),
            platforms: platforms.iter().map(|s| s.to_string()).collect(),
            media_urls: None,
            profile_keys: None,
        }
    }

    #[test]
    fn test_caption_required() {
        assert!(request("", &["twitter"]).validate().is_err());
        assert!(request("   ", &["twitter"]).validate().is_err());
    }

    #[test]
    fn test_platforms_required() {
        assert!(request("hello", &[]).validate().is_err());
        assert!(request("hello", &["twitter"]).validate().is_ok());
    }

    #[test]
    fn test_wire_shape_uses_camel_case() {
        let mut req = request("hello", &["twitter"]);
        req.media_urls = Some(vec!["https://cdn.example/cat.png".into()]);

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["post"], "hello");
        assert_eq!(json["mediaUrls"][0], "https://cdn.example/cat.png");
        assert!(json.get("profileKeys").is_none());
    }
}
