//! Cloudinary Upload Client
//!
//! Signed multipart upload to Cloudinary's auto resource endpoint. The file
//! is forwarded unmodified; Cloudinary owns the object and issues the public
//! URL. Requests are signed with SHA-256 over the sorted parameter string
//! plus the API secret.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{MediaError, Result};

/// Folder all postara uploads land in
const UPLOAD_FOLDER: &str = "postara";

/// Default upload ceiling: 50 MB
const DEFAULT_MAX_BYTES: u64 = 50 * 1024 * 1024;

/// Cloudinary credentials and limits
#[derive(Clone, Debug)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,

    /// Maximum accepted file size in bytes
    pub max_bytes: u64,
}

impl CloudinaryConfig {
    /// Create from environment variables.
    ///
    /// Requires `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY`, and
    /// `CLOUDINARY_API_SECRET`; `MAX_UPLOAD_BYTES` optionally overrides the
    /// size ceiling.
    pub fn from_env() -> Result<Self> {
        let cloud_name = std::env::var("CLOUDINARY_CLOUD_NAME")
            .map_err(|_| MediaError::Config("CLOUDINARY_CLOUD_NAME not set".into()))?;
        let api_key = std::env::var("CLOUDINARY_API_KEY")
            .map_err(|_| MediaError::Config("CLOUDINARY_API_KEY not set".into()))?;
        let api_secret = std::env::var("CLOUDINARY_API_SECRET")
            .map_err(|_| MediaError::Config("CLOUDINARY_API_SECRET not set".into()))?;

        let max_bytes = std::env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_BYTES);

        Ok(Self {
            cloud_name,
            api_key,
            api_secret,
            max_bytes,
        })
    }
}

/// Result of a successful upload
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadResult {
    /// Browser-accessible address issued by the storage provider
    pub public_url: String,

    /// Object size in bytes as reported upstream
    pub byte_size: u64,

    /// Format/extension as reported upstream, e.g. "png"
    pub format: Option<String>,

    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    #[serde(default)]
    bytes: u64,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

#[derive(Deserialize)]
struct UpstreamError {
    error: UpstreamErrorDetail,
}

#[derive(Deserialize)]
struct UpstreamErrorDetail {
    #[serde(default)]
    message: String,
}

/// Cloudinary client
pub struct CloudinaryClient {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(CloudinaryConfig::from_env()?))
    }

    /// Configured upload ceiling in bytes
    pub fn max_bytes(&self) -> u64 {
        self.config.max_bytes
    }

    /// Upload a file and return its public URL plus metadata.
    ///
    /// The size ceiling is enforced from local file metadata before any
    /// network call is made.
    pub async fn upload_file(&self, path: &Path, file_name: &str) -> Result<UploadResult> {
        let size = tokio::fs::metadata(path).await?.len();
        if size > self.config.max_bytes {
            return Err(MediaError::TooLarge {
                size,
                max: self.config.max_bytes,
            });
        }

        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|e| MediaError::Upload(e.to_string()))?
            .as_secs();

        // Signed params, sorted by key; file and api_key stay out of the signature
        let params = [
            ("folder", UPLOAD_FOLDER.to_string()),
            ("overwrite", "false".to_string()),
            ("timestamp", timestamp.to_string()),
            ("unique_filename", "true".to_string()),
            ("use_filename", "true".to_string()),
        ];
        let signature = sign_params(&params, &self.config.api_secret);

        let bytes = tokio::fs::read(path).await?;
        let file_part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());

        let mut form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in params {
            form = form.text(key, value);
        }

        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/auto/upload",
            self.config.cloud_name
        );

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = match serde_json::from_str::<UpstreamError>(&body) {
                Ok(parsed) if !parsed.error.message.is_empty() => parsed.error.message,
                _ => format!("Upstream HTTP {}", status),
            };
            return Err(MediaError::Upload(detail));
        }

        let parsed: UploadResponse = serde_json::from_str(&body)?;
        let public_url = parsed
            .secure_url
            .ok_or_else(|| MediaError::Upload("No secure_url in response".into()))?;

        tracing::info!(
            url = %public_url,
            bytes = parsed.bytes,
            format = ?parsed.format,
            "Uploaded media"
        );

        Ok(UploadResult {
            public_url,
            byte_size: parsed.bytes,
            format: parsed.format,
            width: parsed.width,
            height: parsed.height,
        })
    }

    /// Check credentials against the admin ping endpoint
    pub async fn ping(&self) -> Result<bool> {
        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/ping",
            self.config.cloud_name
        );

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

/// SHA-256 signature over `key=value` pairs joined with `&`, plus the secret
fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let to_sign: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();

    let mut hasher = Sha256::new();
    hasher.update(to_sign.join("&").as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
