//! Caption Request/Response Contract
//!
//! Transient wire shapes for one caption-generation call. Nothing here is
//! persisted; the request exists only for the duration of one HTTP call.

use serde::{Deserialize, Serialize};

use crate::error::{CaptionError, Result};

/// Ceiling for inline image payloads (approximate decoded bytes)
pub const MAX_IMAGE_BYTES: usize = 2_000_000;

/// Hard cap on requested caption count
pub const MAX_CAPTION_COUNT: usize = 10;

/// Inline image reference, carried as a base64 data URL
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageRef {
    /// "data:image/png;base64,....."
    pub data_url: String,

    /// Declared MIME type, e.g. "image/png"
    pub mime_type: String,
}

/// Request to generate captions from text or an image
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaptionRequest {
    /// Text to caption (either this or `image` must be present)
    #[serde(default)]
    pub text: Option<String>,

    /// Image to caption
    #[serde(default)]
    pub image: Option<ImageRef>,

    /// Target platform, e.g. "instagram"
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Desired tone, e.g. "funny", "neutral"
    #[serde(default = "default_tone")]
    pub tone: String,

    /// Number of caption options to generate
    #[serde(default = "default_count")]
    pub count: usize,

    /// Seed hashtags to include or adapt, e.g. "#sun #beach"
    #[serde(default)]
    pub hashtags: Option<String>,
}

fn default_platform() -> String {
    "instagram".into()
}
fn default_tone() -> String {
    "neutral".into()
}
fn default_count() -> usize {
    5
}

impl CaptionRequest {
    /// Validate the request. Must pass before any outbound call is made.
    pub fn validate(&self) -> Result<()> {
        let has_text = self.text.as_deref().is_some_and(|t| !t.trim().is_empty());

        if !has_text && self.image.is_none() {
            return Err(CaptionError::Validation(
                "Provide text or an image (data_url + mime_type)".into(),
            ));
        }

        if let Some(image) = &self.image {
            if !image.data_url.starts_with("data:") {
                return Err(CaptionError::Validation(
                    "image.data_url must be a data URL".into(),
                ));
            }
            if !image.mime_type.starts_with("image/") {
                return Err(CaptionError::Validation(
                    "Only image uploads are supported".into(),
                ));
            }
            let size = approx_data_url_bytes(&image.data_url);
            if size > MAX_IMAGE_BYTES {
                return Err(CaptionError::Validation(format!(
                    "Image too large: ~{} bytes (max {})",
                    size, MAX_IMAGE_BYTES
                )));
            }
        }

        Ok(())
    }

    /// Requested count clamped to sane bounds
    pub fn count_clamped(&self) -> usize {
        self.count.clamp(1, MAX_CAPTION_COUNT)
    }
}

/// Result of one caption-generation call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaptionResult {
    /// Captions in model-output order, deduplicated, truncated to count
    pub captions: Vec<String>,

    /// Sanitized hashtags (lowercase alphanumeric, capped)
    pub hashtags: Vec<String>,

    /// Model that produced the captions
    pub model: String,
}

/// Approximate decoded byte size of a base64 data URL.
///
/// Rough check only: base64 expands data by 4/3, so decoded size is about
/// 3/4 of the payload length after the comma.
pub fn approx_data_url_bytes(data_url: &str) -> usize {
    match data_url.find(',') {
        Some(comma) => (data_url.len() - comma - 1) * 3 / 4,
        None => data_url.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_request(text: &str) -> CaptionRequest {
        CaptionRequest {
            text: Some(text.into()),
            image: None,
            platform: default_platform(),
            tone: default_tone(),
            count: default_count(),
            hashtags: None,
        }
    }

    #[test]
    fn test_rejects_empty_request() {
        let mut req = text_request("");
        req.text = None;
        assert!(req.validate().is_err());

        // Blank text counts as absent
        let req = text_request("   ");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_accepts_text_only() {
        assert!(text_request("sunset at the beach").validate().is_ok());
    }

    #[test]
    fn test_rejects_non_data_url() {
        let mut req = text_request("");
        req.text = None;
        req.image = Some(ImageRef {
            data_url: "https://example.com/cat.png".into(),
            mime_type: "image/png".into(),
        });
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rejects_non_image_mime() {
        let mut req = text_request("");
        req.text = None;
        req.image = Some(ImageRef {
            data_url: "data:application/pdf;base64,AAAA".into(),
            mime_type: "application/pdf".into(),
        });
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_image() {
        let payload = "A".repeat(MAX_IMAGE_BYTES * 2);
        let mut req = text_request("");
        req.text = None;
        req.image = Some(ImageRef {
            data_url: format!("data:image/png;base64,{}", payload),
            mime_type: "image/png".into(),
        });
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_approx_bytes() {
        // 8 base64 chars decode to 6 bytes
        assert_eq!(approx_data_url_bytes("data:image/png;base64,AAAAAAAA"), 6);
    }

    #[test]
    fn test_count_clamped() {
        let mut req = text_request("hi");
        req.count = 0;
        assert_eq!(req.count_clamped(), 1);
        req.count = 99;
        assert_eq!(req.count_clamped(), MAX_CAPTION_COUNT);
    }

    #[test]
    fn test_request_defaults_from_json() {
        let req: CaptionRequest = serde_json::from_str(r#"{"text":"hello"}"#).unwrap();
        assert_eq!(req.platform, "instagram");
        assert_eq!(req.tone, "neutral");
        assert_eq!(req.count, 5);
    }
}
