//! OpenAI-compatible chat completion client.
//!
//! Implements [`platform_core::LanguageModel`] over the standard
//! `/v1/chat/completions` endpoint. Used by the coordinator for
//! post-meeting chat replies and by the summarization job.

mod api_types;
mod client;
mod config;

pub use api_types::{ChatCompletionRequest, ChatCompletionResponse, Choice, Usage};
pub use client::OpenAiClient;
pub use config::{OpenAiConfig, OpenAiConfigBuilder};
