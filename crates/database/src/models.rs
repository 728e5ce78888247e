//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle status of a meeting.
///
/// Transitions are monotonic: `upcoming → active → processing →
/// completed`, with `upcoming → cancelled` as a user-initiated branch.
/// `completed` and `cancelled` are terminal. Every transition is
/// applied through a conditional update on the expected prior status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MeetingStatus {
    Upcoming,
    Active,
    Processing,
    Completed,
    Cancelled,
}

impl MeetingStatus {
    /// The lowercase string stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Upcoming => "upcoming",
            MeetingStatus::Active => "active",
            MeetingStatus::Processing => "processing",
            MeetingStatus::Completed => "completed",
            MeetingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user of the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    /// Display name, used for transcript speaker resolution.
    pub name: String,
}

/// A reusable AI participant configuration.
///
/// Read-only from the webhook coordinator's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Agent {
    pub id: String,
    pub name: String,
    /// Free-text behavioral instructions, used as the live session's
    /// system prompt and folded into the post-meeting chat prompt.
    pub instructions: String,
    /// Owning user.
    pub user_id: String,
}

/// A scheduled or in-progress meeting.
///
/// The meeting id doubles as the external platform's call id and chat
/// channel id. Timestamps are RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Meeting {
    pub id: String,
    pub name: String,
    /// Owning user.
    pub user_id: String,
    /// Agent backing this meeting; fixed at creation time.
    pub agent_id: String,
    pub status: MeetingStatus,
    pub started_at: Option<String>,
    pub ended_at: Option<String>,
    pub transcript_url: Option<String>,
    pub recording_url: Option<String>,
    pub summary: Option<String>,
}

impl Meeting {
    /// Create a new `upcoming` meeting with empty post-hoc fields.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        user_id: impl Into<String>,
        agent_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            user_id: user_id.into(),
            agent_id: agent_id.into(),
            status: MeetingStatus::Upcoming,
            started_at: None,
            ended_at: None,
            transcript_url: None,
            recording_url: None,
            summary: None,
        }
    }
}
