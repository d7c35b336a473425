//! API Client

use serde::{Deserialize, Serialize};

/// Caption generation result for display
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CaptionResult {
    #[serde(default)]
    pub captions: Vec<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// Request captions from the backend
pub async fn generate_captions(
    text: &str,
    tone: &str,
    platform: &str,
    hashtags: &str,
) -> Result<CaptionResult, String> {
    let client = reqwest::Client::new();

    let mut body = serde_json::json!({
        "text": text,
        "tone": tone,
        "platform": platform,
    });
    if !hashtags.trim().is_empty() {
        body["hashtags"] = serde_json::json!(hashtags);
    }

    let response = client
        .post("/api/caption")
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        Err(data["error"]
            .as_str()
            .unwrap_or("Caption request failed")
            .to_string())
    }
}

/// Forward a post to the multi-network distribution API
pub async fn social_post(
    caption: &str,
    media_url: Option<&str>,
    platforms: &[String],
) -> Result<(), String> {
    let client = reqwest::Client::new();

    let mut body = serde_json::json!({
        "post": caption,
        "platforms": platforms,
    });
    if let Some(url) = media_url {
        body["mediaUrls"] = serde_json::json!([url]);
    }

    let response = client
        .post("/api/post")
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        Ok(())
    } else {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        Err(data["error"].as_str().unwrap_or("Post failed").to_string())
    }
}
