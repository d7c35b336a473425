//! postara HTTP Server
//!
//! Axum-based server for the caption generator and social-share tool.
//! Every endpoint is thin glue over one external service: OpenAI for
//! captions, Cloudinary for media storage, Stripe for subscriptions, and
//! Ayrshare for multi-network posting.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postara_core::{provider::GenerationOptions, CaptionEngine, LlmProvider};
use postara_media::{AyrshareClient, CloudinaryClient};
use postara_payments::StripeClient;
use postara_runtime::OpenAiProvider;

use crate::handlers::{
    create_checkout, env_check, generate_captions, health_check, social_post, storage_ping,
    stripe_webhook, upload_media,
};
use crate::state::AppState;

// Slack over the upload ceiling for multipart framing overhead
const UPLOAD_BODY_LIMIT: usize = 64 * 1024 * 1024;

/// Build the full route table over the given state
fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & config
        .route("/health", get(health_check))
        .route("/api/env", get(env_check))
        .route("/api/storage/ping", get(storage_ping))
        // Tool API
        .route("/api/caption", post(generate_captions))
        .route(
            "/api/upload",
            post(upload_media).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/post", post(social_post))
        // Payments
        .route("/api/checkout", get(create_checkout))
        .route("/webhook/stripe", post(stripe_webhook))
        // Static files (marketing site + WASM tool); axum 0.8 rejects
        // nesting at "/", so unmatched paths fall through to ServeDir
        .fallback_service(tower_http::services::ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let production = matches!(
        std::env::var("APP_ENV").as_deref(),
        Ok("production") | Ok("prod")
    );

    // Caption engine
    let engine = match OpenAiProvider::from_env() {
        Ok(provider) => {
            let provider = Arc::new(provider);
            match provider.health_check().await {
                Ok(true) => tracing::info!("✓ OpenAI reachable"),
                _ => tracing::warn!("⚠ OpenAI configured but not reachable"),
            }

            let mut options = GenerationOptions::default();
            if let Ok(model) = std::env::var("OPENAI_MODEL") {
                options.model = model;
            }

            Some(Arc::new(CaptionEngine::new(provider, options)))
        }
        Err(e) => {
            tracing::warn!("⚠ Captions disabled: {}", e);
            None
        }
    };

    // Media storage
    let cloudinary = match CloudinaryClient::from_env() {
        Ok(client) => {
            match client.ping().await {
                Ok(true) => tracing::info!("✓ Cloudinary reachable"),
                _ => tracing::warn!("⚠ Cloudinary configured but not reachable"),
            }
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!("⚠ Uploads disabled: {}", e);
            None
        }
    };

    // Multi-network posting
    let ayrshare = match AyrshareClient::from_env() {
        Ok(client) => {
            tracing::info!("✓ Ayrshare configured");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!("⚠ Posting disabled: {}", e);
            None
        }
    };

    // Payments
    let stripe = match StripeClient::from_env() {
        Ok(client) => {
            tracing::info!("✓ Stripe configured");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!("⚠ Payments disabled: {}", e);
            None
        }
    };

    let state = AppState {
        engine,
        cloudinary,
        ayrshare,
        stripe,
        production,
    };

    let app = app_router(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("postara server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health          - Health check");
    tracing::info!("  GET  /api/env         - Safe config check");
    tracing::info!("  GET  /api/storage/ping - Storage credential check");
    tracing::info!("  POST /api/caption     - Generate captions");
    tracing::info!("  POST /api/upload      - Upload media");
    tracing::info!("  POST /api/post        - Post across networks");
    tracing::info!("  GET  /api/checkout    - Stripe checkout redirect");
    tracing::info!("  POST /webhook/stripe  - Stripe webhook");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Router construction must not panic; axum 0.8 aborts on a service
    // nested at "/"
    #[test]
    fn test_router_builds_with_static_fallback() {
        let state = AppState {
            engine: None,
            cloudinary: None,
            ayrshare: None,
            stripe: None,
            production: false,
        };
        let _router = app_router(state);
    }
}
