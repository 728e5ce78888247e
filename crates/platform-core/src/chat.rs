//! Chat platform trait.

use async_trait::async_trait;

use crate::error::PlatformError;
use crate::message::{ChannelMessage, ChatUser};

/// Control surface of the external chat platform.
///
/// Channels are keyed by meeting id; the post-meeting Q&A channel for a
/// meeting shares the meeting's id.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Register or update a chat user (idempotent upsert).
    async fn upsert_user(&self, user: &ChatUser) -> Result<(), PlatformError>;

    /// Fetch the most recent messages of a channel, oldest first,
    /// at most `limit` of them. Blank messages are included; callers
    /// filter as needed.
    async fn recent_messages(
        &self,
        channel_id: &str,
        limit: usize,
    ) -> Result<Vec<ChannelMessage>, PlatformError>;

    /// Post a message into a channel under the given user's identity.
    async fn send_message(
        &self,
        channel_id: &str,
        text: &str,
        as_user: &ChatUser,
    ) -> Result<(), PlatformError>;

    /// Issue an access token for a chat user.
    async fn create_token(&self, user_id: &str) -> Result<String, PlatformError>;
}
