//! # postara-core
//!
//! Core caption-generation logic with a provider-agnostic LLM abstraction.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    CaptionEngine                          │
//! │  ┌──────────┐  ┌───────────┐  ┌──────────────────────┐   │
//! │  │  Prompt  │  │  Parsing  │  │   LlmProvider        │   │
//! │  │ Template │──│ /Fallback │──│   (Strategy)         │   │
//! │  └──────────┘  └───────────┘  └──────────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait enables swapping between OpenAI-compatible
//! backends (or a mock in tests) without changing engine logic.

pub mod caption;
pub mod engine;
pub mod error;
pub mod hashtag;
pub mod message;
pub mod parse;
pub mod prompt;
pub mod provider;

pub use caption::{CaptionRequest, CaptionResult, ImageRef};
pub use engine::CaptionEngine;
pub use error::{CaptionError, Result};
pub use message::{ContentPart, Message, MessageContent, Role};
pub use provider::LlmProvider;
