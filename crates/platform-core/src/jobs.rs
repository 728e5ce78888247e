//! Background job types and dispatcher trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// A background job payload.
///
/// Jobs are fire-and-forget: enqueueing succeeds as soon as the queue
/// accepts the payload, with no delivery guarantee beyond best effort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Job {
    /// Summarize a meeting transcript and complete the meeting.
    Summarize {
        meeting_id: String,
        transcript_url: String,
    },
}

/// Accepts background jobs for asynchronous processing.
#[async_trait]
pub trait JobDispatcher: Send + Sync {
    /// Enqueue a job. Returns once the queue has accepted it.
    async fn enqueue(&self, job: Job) -> Result<(), PlatformError>;
}
