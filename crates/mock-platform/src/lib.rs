//! Mock implementations of the platform traits for testing.
//!
//! This crate provides in-memory fakes of every `platform-core` trait:
//! - [`MockCallPlatform`] - records ended calls and agent connections
//! - [`MockChatPlatform`] - seeded channel history, records sent messages
//! - [`MockLanguageModel`] - fixed reply, empty, or failing modes
//! - [`MockJobDispatcher`] - collects enqueued jobs
//!
//! Every recorded interaction is observable, so tests can assert both
//! what happened and what did not.
//!
//! # Example
//!
//! ```rust
//! use mock_platform::{LanguageModel, MockLanguageModel};
//!
//! #[tokio::main]
//! async fn main() {
//!     let llm = MockLanguageModel::replying("hello");
//!     let reply = llm.complete("system", &[]).await.unwrap();
//!     assert_eq!(reply, "hello");
//! }
//! ```

mod call;
mod chat;
mod jobs;
mod llm;

pub use call::MockCallPlatform;
pub use chat::{MockChatPlatform, SentMessage};
pub use jobs::MockJobDispatcher;
pub use llm::MockLanguageModel;

// Re-export platform-core types for convenience
pub use platform_core::{
    async_trait, CallPlatform, ChannelMessage, ChatMessage, ChatPlatform, ChatUser, Job,
    JobDispatcher, LanguageModel, PlatformError, RealtimeSession,
};
