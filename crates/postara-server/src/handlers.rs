//! HTTP Handlers
//!
//! One thin handler per endpoint: parse the request, call one external
//! service through its client, reshape the result. Every failure is
//! terminal for its request; nothing is retried or queued.

use std::io::Write;

use axum::{
    extract::{Multipart, Query, State},
    http::{HeaderMap, StatusCode},
    response::Redirect,
    Json,
};
use serde::{Deserialize, Serialize};

use postara_core::{CaptionError, CaptionRequest};
use postara_media::{MediaError, SocialPostRequest, SocialPostResponse, UploadResult};
use postara_payments::{PaymentError, Plan, WebhookHandler};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub captions_configured: bool,
    pub storage_configured: bool,
    pub posting_configured: bool,
    pub stripe_configured: bool,
}

#[derive(Serialize)]
pub struct EnvResponse {
    pub openai_api_key: &'static str,
    pub cloudinary: &'static str,
    pub ayrshare_api_key: &'static str,
    pub stripe_secret_key: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CaptionResponse {
    pub ok: bool,
    pub captions: Vec<String>,
    pub hashtags: Vec<String>,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub url: String,
    pub byte_size: u64,
    pub format: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutParams {
    #[serde(default = "default_plan")]
    pub plan: String,
}

fn default_plan() -> String {
    "pro".into()
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

#[derive(Debug, Serialize)]
pub struct StoragePingResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: code.into(),
            detail: None,
        }),
    )
}

fn config_error() -> ApiError {
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "CONFIG_ERROR",
        "Service configuration error.",
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        captions_configured: state.engine.is_some(),
        storage_configured: state.cloudinary.is_some(),
        posting_configured: state.ayrshare.is_some(),
        stripe_configured: state.stripe.is_some(),
    })
}

/// Safe config check: which credentials are present, never their values
pub async fn env_check(State(state): State<AppState>) -> Json<EnvResponse> {
    fn flag(present: bool) -> &'static str {
        if present {
            "SET"
        } else {
            "MISSING"
        }
    }

    Json(EnvResponse {
        openai_api_key: flag(state.engine.is_some()),
        cloudinary: flag(state.cloudinary.is_some()),
        ayrshare_api_key: flag(state.ayrshare.is_some()),
        stripe_secret_key: flag(state.stripe.is_some()),
    })
}

/// Verify storage credentials against the provider's ping endpoint
pub async fn storage_ping(
    State(state): State<AppState>,
) -> Result<Json<StoragePingResponse>, ApiError> {
    let cloudinary = state.cloudinary.as_ref().ok_or_else(config_error)?;

    let ok = cloudinary.ping().await.map_err(|e| {
        tracing::error!("Storage ping failed: {}", e);
        media_error_response(e)
    })?;

    Ok(Json(StoragePingResponse { ok }))
}

/// Generate captions from text or an image
pub async fn generate_captions(
    State(state): State<AppState>,
    Json(payload): Json<CaptionRequest>,
) -> Result<Json<CaptionResponse>, ApiError> {
    let engine = state.engine.as_ref().ok_or_else(config_error)?;

    let result = engine.generate(&payload).await.map_err(|e| {
        tracing::error!("Caption generation failed: {}", e);
        caption_error_response(e, state.production)
    })?;

    Ok(Json(CaptionResponse {
        ok: true,
        captions: result.captions,
        hashtags: result.hashtags,
        model: result.model,
    }))
}

fn caption_error_response(error: CaptionError, production: bool) -> ApiError {
    match error {
        CaptionError::Validation(msg) => api_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
        CaptionError::Config(_) => config_error(),
        CaptionError::Parse { message, raw } => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: message,
                code: "UPSTREAM_PARSE_ERROR".into(),
                // Raw upstream payload is diagnostic-only; keep it out of
                // production responses
                detail: if production { None } else { raw },
            }),
        ),
        other => api_error(StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", other.user_message()),
    }
}

/// Accept one multipart file, forward it to hosted storage, return its URL.
///
/// The first file field wins. Bytes are staged in a scratch temp file that
/// is removed when this handler returns, success or failure.
pub async fn upload_media(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let cloudinary = state.cloudinary.as_ref().ok_or_else(config_error)?;
    let max_bytes = cloudinary.max_bytes();

    let mut staged: Option<(tempfile::NamedTempFile, String)> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(|e| {
        api_error(
            StatusCode::BAD_REQUEST,
            "INVALID_MULTIPART",
            format!("Failed to parse multipart data: {}", e),
        )
    })? {
        if field.file_name().is_none() {
            continue;
        }
        let file_name = field
            .file_name()
            .map(String::from)
            .unwrap_or_else(|| "upload".into());

        let mut scratch = tempfile::NamedTempFile::new().map_err(|e| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "SCRATCH_ERROR",
                e.to_string(),
            )
        })?;

        let mut written: u64 = 0;
        while let Some(chunk) = field.chunk().await.map_err(|e| {
            api_error(
                StatusCode::BAD_REQUEST,
                "INVALID_MULTIPART",
                format!("Failed to read file chunk: {}", e),
            )
        })? {
            written += chunk.len() as u64;
            // Ceiling is enforced while reading, before any forwarding call
            if written > max_bytes {
                return Err(api_error(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "FILE_TOO_LARGE",
                    format!("File exceeds maximum size of {} bytes", max_bytes),
                ));
            }
            scratch.write_all(&chunk).map_err(|e| {
                api_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SCRATCH_ERROR",
                    e.to_string(),
                )
            })?;
        }

        staged = Some((scratch, file_name));
        break; // single-file only: first file field wins
    }

    let (scratch, file_name) =
        staged.ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "NO_FILE", "No file received"))?;

    let result: UploadResult = cloudinary
        .upload_file(scratch.path(), &file_name)
        .await
        .map_err(|e| {
            tracing::error!("Upload failed: {}", e);
            media_error_response(e)
        })?;
    // scratch drops here and the temp file is removed

    Ok(Json(UploadResponse {
        ok: true,
        url: result.public_url,
        byte_size: result.byte_size,
        format: result.format,
        width: result.width,
        height: result.height,
    }))
}

fn media_error_response(error: MediaError) -> ApiError {
    match error {
        MediaError::Validation(msg) => api_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
        MediaError::NoFile => api_error(StatusCode::BAD_REQUEST, "NO_FILE", "No file received"),
        MediaError::TooLarge { max, .. } => api_error(
            StatusCode::PAYLOAD_TOO_LARGE,
            "FILE_TOO_LARGE",
            format!("File exceeds maximum size of {} bytes", max),
        ),
        MediaError::Config(_) => config_error(),
        other => api_error(StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", other.user_message()),
    }
}

/// Create a hosted checkout session and redirect the browser to it
pub async fn create_checkout(
    State(state): State<AppState>,
    Query(params): Query<CheckoutParams>,
    headers: HeaderMap,
) -> Result<Redirect, ApiError> {
    let stripe = state.stripe.as_ref().ok_or_else(config_error)?;

    let plan = Plan::parse(&params.plan).map_err(|e| {
        api_error(StatusCode::BAD_REQUEST, "UNKNOWN_PLAN", e.user_message())
    })?;

    let origin = request_origin(&headers);

    let session = stripe
        .create_checkout_session(plan, &origin)
        .await
        .map_err(|e| {
            tracing::error!("Checkout error: {}", e);
            match e {
                PaymentError::Config(_) | PaymentError::KeyModeMismatch { .. } => config_error(),
                other => api_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CHECKOUT_ERROR",
                    other.user_message(),
                ),
            }
        })?;

    // 303 so the browser re-issues as GET
    Ok(Redirect::to(&session.checkout_url))
}

/// Derive the request origin (scheme + host) for redirect URLs.
///
/// Proxies set x-forwarded-proto; plain local serving falls back to http.
fn request_origin(headers: &HeaderMap) -> String {
    if let Some(origin) = headers.get("origin").and_then(|v| v.to_str().ok()) {
        return origin.to_string();
    }

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get("host")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost:3000");

    format!("{}://{}", scheme, host)
}

/// Stripe webhook: verify the signature over the raw body, log the event
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<WebhookAck>, ApiError> {
    let stripe = state.stripe.as_ref().ok_or_else(config_error)?;

    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                "MISSING_SIGNATURE",
                "Missing Stripe signature",
            )
        })?;

    let handler = WebhookHandler::new(stripe.webhook_secret());

    let event = handler.parse_event(&body, signature).map_err(|e| {
        tracing::warn!("Webhook rejected: {}", e);
        match e {
            PaymentError::WebhookSignature(_) => api_error(
                StatusCode::BAD_REQUEST,
                "INVALID_SIGNATURE",
                "Invalid signature",
            ),
            _ => api_error(
                StatusCode::BAD_REQUEST,
                "INVALID_PAYLOAD",
                "Invalid payload",
            ),
        }
    })?;

    handler.handle(&event);

    Ok(Json(WebhookAck { received: true }))
}

/// Forward a caption + media URL + platform list to the distribution API
pub async fn social_post(
    State(state): State<AppState>,
    Json(payload): Json<SocialPostRequest>,
) -> Result<Json<SocialPostResponse>, ApiError> {
    let ayrshare = state.ayrshare.as_ref().ok_or_else(config_error)?;

    let response = ayrshare.post(&payload).await.map_err(|e| {
        tracing::error!("Social post failed: {}", e);
        media_error_response(e)
    })?;

    Ok(Json(response))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use postara_core::{
        provider::{Completion, GenerationOptions, LlmProvider},
        CaptionEngine, Message,
    };
    use postara_payments::StripeClient;
    use std::sync::Arc;

    struct StubProvider {
        content: &'static str,
    }

    #[async_trait]
    impl LlmProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn health_check(&self) -> postara_core::Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            _messages: &[Message],
            options: &GenerationOptions,
        ) -> postara_core::Result<Completion> {
            Ok(Completion {
                content: self.content.into(),
                model: options.model.clone(),
                usage: None,
            })
        }
    }

    fn empty_state() -> AppState {
        AppState {
            engine: None,
            cloudinary: None,
            ayrshare: None,
            stripe: None,
            production: false,
        }
    }

    fn state_with_engine(content: &'static str) -> AppState {
        let engine = CaptionEngine::new(
            Arc::new(StubProvider { content }),
            GenerationOptions::default(),
        );
        AppState {
            engine: Some(Arc::new(engine)),
            ..empty_state()
        }
    }

    fn caption_request(json: &str) -> CaptionRequest {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_caption_without_credential_is_config_error() {
        let result = generate_captions(
            State(empty_state()),
            Json(caption_request(r#"{"text":"hi"}"#)),
        )
        .await;

        let (status, body) = result.err().unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "CONFIG_ERROR");
    }

    #[tokio::test]
    async fn test_caption_empty_request_is_bad_request() {
        let result =
            generate_captions(State(state_with_engine("x")), Json(caption_request("{}"))).await;

        let (status, body) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_caption_dedupes_stubbed_output() {
        let result = generate_captions(
            State(state_with_engine("Cap A\nCap A\nCap B")),
            Json(caption_request(
                r##"{"text":"x","tone":"Funny","platform":"Instagram","hashtags":"#sun"}"##,
            )),
        )
        .await
        .unwrap();

        assert_eq!(result.0.captions, vec!["Cap A", "Cap B"]);
        assert!(result.0.ok);
    }

    #[tokio::test]
    async fn test_checkout_unknown_plan_rejected() {
        let state = AppState {
            stripe: Some(Arc::new(StripeClient::new(
                "sk_test_abc",
                "price_123",
                "whsec_x",
                None,
            ))),
            ..empty_state()
        };

        let result = create_checkout(
            State(state),
            Query(CheckoutParams {
                plan: "enterprise".into(),
            }),
            HeaderMap::new(),
        )
        .await;

        let (status, body) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "UNKNOWN_PLAN");
    }

    #[tokio::test]
    async fn test_checkout_bad_key_prefix_is_config_error() {
        let state = AppState {
            stripe: Some(Arc::new(StripeClient::new(
                "bogus", "price_123", "whsec_x", None,
            ))),
            ..empty_state()
        };

        let result = create_checkout(
            State(state),
            Query(CheckoutParams { plan: "pro".into() }),
            HeaderMap::new(),
        )
        .await;

        let (status, body) = result.err().unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "CONFIG_ERROR");
    }

    #[tokio::test]
    async fn test_webhook_bad_signature_rejected() {
        let state = AppState {
            stripe: Some(Arc::new(StripeClient::new(
                "sk_test_abc",
                "price_123",
                "whsec_x",
                None,
            ))),
            ..empty_state()
        };

        let mut headers = HeaderMap::new();
        headers.insert("stripe-signature", "t=1,v1=deadbeef".parse().unwrap());

        let result = stripe_webhook(
            State(state),
            headers,
            r#"{"type":"checkout.session.completed","data":{"object":{"id":"cs_1"}}}"#.into(),
        )
        .await;

        let (status, body) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_SIGNATURE");
    }

    #[tokio::test]
    async fn test_webhook_missing_signature_rejected() {
        let state = AppState {
            stripe: Some(Arc::new(StripeClient::new(
                "sk_test_abc",
                "price_123",
                "whsec_x",
                None,
            ))),
            ..empty_state()
        };

        let result = stripe_webhook(State(state), HeaderMap::new(), "{}".into()).await;

        let (_, body) = result.err().unwrap();
        assert_eq!(body.code, "MISSING_SIGNATURE");
    }

    #[tokio::test]
    async fn test_storage_ping_without_credential_is_config_error() {
        let result = storage_ping(State(empty_state())).await;

        let (status, body) = result.err().unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "CONFIG_ERROR");
    }

    #[tokio::test]
    async fn test_social_post_without_credential_is_config_error() {
        let request = SocialPostRequest {
            post: "hello".into(),
            platforms: vec!["twitter".into()],
            media_urls: None,
            profile_keys: None,
        };

        let result = social_post(State(empty_state()), Json(request)).await;

        let (status, body) = result.err().unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_request_origin_prefers_origin_header() {
        let mut headers = HeaderMap::new();
        headers.insert("origin", "https://postara.example".parse().unwrap());
        headers.insert("host", "internal:8080".parse().unwrap());
        assert_eq!(request_origin(&headers), "https://postara.example");
    }

    #[test]
    fn test_request_origin_from_forwarded_proto_and_host() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-proto", "https".parse().unwrap());
        headers.insert("host", "postara.example".parse().unwrap());
        assert_eq!(request_origin(&headers), "https://postara.example");
    }
}
