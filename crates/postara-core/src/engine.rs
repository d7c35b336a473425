//! Caption Engine
//!
//! Single-request orchestration: validate, build the prompt, call the
//! provider once, parse and sanitize the output. No state survives the call.

use std::sync::Arc;

use crate::caption::{CaptionRequest, CaptionResult};
use crate::error::Result;
use crate::hashtag::sanitize_hashtags;
use crate::parse::parse_completion;
use crate::prompt::build_messages;
use crate::provider::{GenerationOptions, LlmProvider};

/// Caption generation engine
pub struct CaptionEngine {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
}

impl CaptionEngine {
    pub fn new(provider: Arc<dyn LlmProvider>, options: GenerationOptions) -> Self {
        Self { provider, options }
    }

    /// Generate captions for a request.
    ///
    /// Validation runs before the provider is called; an invalid request
    /// makes no outbound call.
    pub async fn generate(&self, request: &CaptionRequest) -> Result<CaptionResult> {
        request.validate()?;

        let messages = build_messages(request);
        let completion = self.provider.complete(&messages, &self.options).await?;

        tracing::debug!(
            provider = self.provider.name(),
            model = %completion.model,
            "Completion received"
        );

        let parsed = parse_completion(&completion.content, request.count_clamped());

        Ok(CaptionResult {
            captions: parsed.captions,
            hashtags: sanitize_hashtags(&parsed.hashtags),
            model: completion.model,
        })
    }
}
