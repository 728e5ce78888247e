//! Error types for event handling.

use database::DatabaseError;
use platform_core::PlatformError;
use thiserror::Error;

use crate::cid::CidParseError;

/// Structured outcome of an event handler.
///
/// The HTTP layer translates these uniformly: `BadRequest` → 400,
/// `MeetingNotFound`/`AgentMissing` → 404, everything else → 500.
/// Recovery from 5xx relies on the platform's webhook redelivery.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// Required field absent or malformed in a recognized event.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No meeting matched the id and expected prior status. Under
    /// at-least-once delivery this usually means a duplicate event.
    #[error("meeting not found: {0}")]
    MeetingNotFound(String),

    /// The meeting references an agent row that does not exist. A data
    /// integrity fault, not an expected runtime condition.
    #[error("agent {agent_id} missing for meeting {meeting_id}")]
    AgentMissing {
        meeting_id: String,
        agent_id: String,
    },

    /// Datastore failure.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Call platform, chat platform, LLM, or job queue failure.
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Transcript could not be fetched or parsed.
    #[error("transcript error: {0}")]
    Transcript(String),
}

impl From<CidParseError> for CoordinatorError {
    fn from(err: CidParseError) -> Self {
        CoordinatorError::BadRequest(err.to_string())
    }
}
