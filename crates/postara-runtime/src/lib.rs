//! # postara-runtime
//!
//! Completion providers for the postara caption engine.
//!
//! ## Providers
//!
//! - **OpenAI** (default): hosted chat completions, text and multimodal
//!
//! ## Usage
//!
//! ```rust,ignore
//! use postara_runtime::OpenAiProvider;
//!
//! let provider = OpenAiProvider::from_env()?;
//! let engine = CaptionEngine::new(Arc::new(provider), GenerationOptions::default());
//! ```

pub mod openai;

pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use postara_core::{
    CaptionEngine, CaptionError, CaptionRequest, CaptionResult, LlmProvider, Message, Result, Role,
};
