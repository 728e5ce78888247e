//! Call platform trait.

use async_trait::async_trait;

use crate::error::PlatformError;
use crate::message::ChatUser;

/// Control surface of the external video call platform.
///
/// The call id is the meeting id: the meeting-creation flow creates the
/// platform call with the meeting's own id, so webhook handlers can
/// address calls without a lookup table.
#[async_trait]
pub trait CallPlatform: Send + Sync {
    /// Verify a webhook payload against its signature header.
    ///
    /// Must be callable before any parsing of `body`; a `false` result
    /// means the payload is discarded unprocessed.
    fn verify_webhook(&self, body: &[u8], signature: &str) -> bool;

    /// End the call with the given id.
    async fn end_call(&self, call_id: &str) -> Result<(), PlatformError>;

    /// Connect an AI participant to the call, appearing as the given
    /// platform user. Returns a handle for configuring the live session.
    async fn connect_agent(
        &self,
        call_id: &str,
        agent_user_id: &str,
    ) -> Result<Box<dyn RealtimeSession>, PlatformError>;

    /// Register or update platform users (idempotent upsert).
    async fn upsert_users(&self, users: &[ChatUser]) -> Result<(), PlatformError>;

    /// Issue an access token for a platform user.
    async fn create_token(&self, user_id: &str) -> Result<String, PlatformError>;
}

/// A live AI session on a call, created by [`CallPlatform::connect_agent`].
#[async_trait]
pub trait RealtimeSession: Send + Sync {
    /// Replace the session's behavioral instructions (system prompt).
    async fn update_instructions(&self, instructions: &str) -> Result<(), PlatformError>;
}
