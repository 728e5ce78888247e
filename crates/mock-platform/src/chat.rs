//! Fake chat platform.

use std::sync::Mutex;

use platform_core::{async_trait, ChannelMessage, ChatPlatform, ChatUser, PlatformError};

/// A message posted through [`MockChatPlatform::send_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub channel_id: String,
    pub text: String,
    pub sender_id: String,
}

/// A [`ChatPlatform`] fake with a seedable channel history.
///
/// For simplicity all seeded messages live in one shared history,
/// which is enough for single-channel tests.
pub struct MockChatPlatform {
    history: Mutex<Vec<ChannelMessage>>,
    sent: Mutex<Vec<SentMessage>>,
    upserted: Mutex<Vec<String>>,
}

impl MockChatPlatform {
    /// Create a fake with an empty history.
    pub fn new() -> Self {
        Self {
            history: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            upserted: Mutex::new(Vec::new()),
        }
    }

    /// Append a message to the channel history.
    pub fn seed_message(&self, sender_id: &str, text: &str) {
        self.history.lock().unwrap().push(ChannelMessage {
            sender_id: sender_id.to_string(),
            text: text.to_string(),
        });
    }

    /// Messages posted via `send_message`, in order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Ids of users passed to `upsert_user`.
    pub fn upserted(&self) -> Vec<String> {
        self.upserted.lock().unwrap().clone()
    }
}

impl Default for MockChatPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatPlatform for MockChatPlatform {
    async fn upsert_user(&self, user: &ChatUser) -> Result<(), PlatformError> {
        self.upserted.lock().unwrap().push(user.id.clone());
        Ok(())
    }

    async fn recent_messages(
        &self,
        _channel_id: &str,
        limit: usize,
    ) -> Result<Vec<ChannelMessage>, PlatformError> {
        let history = self.history.lock().unwrap();
        let start = history.len().saturating_sub(limit);
        Ok(history[start..].to_vec())
    }

    async fn send_message(
        &self,
        channel_id: &str,
        text: &str,
        as_user: &ChatUser,
    ) -> Result<(), PlatformError> {
        self.sent.lock().unwrap().push(SentMessage {
            channel_id: channel_id.to_string(),
            text: text.to_string(),
            sender_id: as_user.id.clone(),
        });
        Ok(())
    }

    async fn create_token(&self, user_id: &str) -> Result<String, PlatformError> {
        Ok(format!("token-{user_id}"))
    }
}
