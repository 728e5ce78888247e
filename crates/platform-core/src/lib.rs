//! Core traits and types shared across the Huddle backend.
//!
//! The coordinator never talks to a vendor SDK directly. Every external
//! collaborator sits behind a trait defined here:
//!
//! - [`CallPlatform`] / [`RealtimeSession`] - video call control and the
//!   AI participant session
//! - [`ChatPlatform`] - post-meeting chat channels
//! - [`LanguageModel`] - chat-completion LLM calls
//! - [`JobDispatcher`] - fire-and-forget background jobs
//!
//! Production implementations live in the `stream-client` and
//! `openai-client` crates; in-memory fakes live in `mock-platform`.
//!
//! # Example
//!
//! ```rust
//! use platform_core::{async_trait, LanguageModel, ChatMessage, PlatformError};
//!
//! struct CannedModel;
//!
//! #[async_trait]
//! impl LanguageModel for CannedModel {
//!     async fn complete(
//!         &self,
//!         _system: &str,
//!         _messages: &[ChatMessage],
//!     ) -> Result<String, PlatformError> {
//!         Ok("canned reply".to_string())
//!     }
//! }
//! ```

mod call;
mod chat;
mod error;
mod jobs;
mod llm;
mod message;

pub use call::{CallPlatform, RealtimeSession};
pub use chat::ChatPlatform;
pub use error::PlatformError;
pub use jobs::{Job, JobDispatcher};
pub use llm::LanguageModel;
pub use message::{ChannelMessage, ChatMessage, ChatUser, Role};

// Re-export async_trait for implementors
pub use async_trait::async_trait;
