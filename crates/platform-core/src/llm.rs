//! Language model trait.

use async_trait::async_trait;

use crate::error::PlatformError;
use crate::message::ChatMessage;

/// A synchronous (single round trip) chat-completion language model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run one completion with a system prompt and a message sequence.
    ///
    /// Implementations must return [`PlatformError::EmptyCompletion`]
    /// when the model produces no usable text, so callers never post a
    /// blank reply.
    async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
    ) -> Result<String, PlatformError>;
}
