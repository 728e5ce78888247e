//! Meeting CRUD and lifecycle transitions.
//!
//! Status transitions are single conditional updates. A transition that
//! matches zero rows returns `Ok(None)` rather than an error: under
//! at-least-once webhook delivery a duplicate or stale event is
//! expected, and the caller decides whether that is a no-op or a 404.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Meeting, MeetingStatus};

const MEETING_COLUMNS: &str = "id, name, user_id, agent_id, status, started_at, ended_at, \
                               transcript_url, recording_url, summary";

/// Create a new meeting.
pub async fn create_meeting(pool: &SqlitePool, meeting: &Meeting) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO meetings (id, name, user_id, agent_id, status)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&meeting.id)
    .bind(&meeting.name)
    .bind(&meeting.user_id)
    .bind(&meeting.agent_id)
    .bind(meeting.status)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Meeting",
                    id: meeting.id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get a meeting by ID.
pub async fn get_meeting(pool: &SqlitePool, id: &str) -> Result<Meeting> {
    sqlx::query_as::<_, Meeting>(&format!(
        "SELECT {MEETING_COLUMNS} FROM meetings WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Meeting",
        id: id.to_string(),
    })
}

/// Get a meeting by ID only if it is currently in the given status.
pub async fn get_meeting_in_status(
    pool: &SqlitePool,
    id: &str,
    status: MeetingStatus,
) -> Result<Option<Meeting>> {
    let meeting = sqlx::query_as::<_, Meeting>(&format!(
        "SELECT {MEETING_COLUMNS} FROM meetings WHERE id = ? AND status = ?"
    ))
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?;

    Ok(meeting)
}

/// List all meetings.
pub async fn list_meetings(pool: &SqlitePool) -> Result<Vec<Meeting>> {
    let meetings = sqlx::query_as::<_, Meeting>(&format!(
        "SELECT {MEETING_COLUMNS} FROM meetings ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(meetings)
}

/// Transition `upcoming → active`, stamping `started_at`.
///
/// Returns the updated row, or `None` if the meeting does not exist or
/// is not currently `upcoming` (duplicate delivery guard).
pub async fn start_meeting(pool: &SqlitePool, id: &str) -> Result<Option<Meeting>> {
    let now = Utc::now().to_rfc3339();

    let meeting = sqlx::query_as::<_, Meeting>(&format!(
        r#"
        UPDATE meetings
        SET status = ?, started_at = ?
        WHERE id = ? AND status = ?
        RETURNING {MEETING_COLUMNS}
        "#
    ))
    .bind(MeetingStatus::Active)
    .bind(&now)
    .bind(id)
    .bind(MeetingStatus::Upcoming)
    .fetch_optional(pool)
    .await?;

    Ok(meeting)
}

/// Transition `active → processing`, stamping `ended_at`.
///
/// Returns `None` when the meeting is not currently `active`.
pub async fn end_meeting(pool: &SqlitePool, id: &str) -> Result<Option<Meeting>> {
    let now = Utc::now().to_rfc3339();

    let meeting = sqlx::query_as::<_, Meeting>(&format!(
        r#"
        UPDATE meetings
        SET status = ?, ended_at = ?
        WHERE id = ? AND status = ?
        RETURNING {MEETING_COLUMNS}
        "#
    ))
    .bind(MeetingStatus::Processing)
    .bind(&now)
    .bind(id)
    .bind(MeetingStatus::Active)
    .fetch_optional(pool)
    .await?;

    Ok(meeting)
}

/// Transition `processing → completed`, storing the summary text.
pub async fn complete_meeting(
    pool: &SqlitePool,
    id: &str,
    summary: &str,
) -> Result<Option<Meeting>> {
    let meeting = sqlx::query_as::<_, Meeting>(&format!(
        r#"
        UPDATE meetings
        SET status = ?, summary = ?
        WHERE id = ? AND status = ?
        RETURNING {MEETING_COLUMNS}
        "#
    ))
    .bind(MeetingStatus::Completed)
    .bind(summary)
    .bind(id)
    .bind(MeetingStatus::Processing)
    .fetch_optional(pool)
    .await?;

    Ok(meeting)
}

/// Transition `upcoming → cancelled` (user-initiated branch).
///
/// Returns `true` if the row was cancelled, `false` if it was not
/// currently `upcoming`.
pub async fn cancel_meeting(pool: &SqlitePool, id: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE meetings
        SET status = ?
        WHERE id = ? AND status = ?
        "#,
    )
    .bind(MeetingStatus::Cancelled)
    .bind(id)
    .bind(MeetingStatus::Upcoming)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Record the transcript artifact URL, regardless of current status.
///
/// Returns the updated row, or `None` if no such meeting exists.
pub async fn set_transcript_url(
    pool: &SqlitePool,
    id: &str,
    url: &str,
) -> Result<Option<Meeting>> {
    let meeting = sqlx::query_as::<_, Meeting>(&format!(
        r#"
        UPDATE meetings
        SET transcript_url = ?
        WHERE id = ?
        RETURNING {MEETING_COLUMNS}
        "#
    ))
    .bind(url)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(meeting)
}

/// Record the recording artifact URL, regardless of current status.
pub async fn set_recording_url(
    pool: &SqlitePool,
    id: &str,
    url: &str,
) -> Result<Option<Meeting>> {
    let meeting = sqlx::query_as::<_, Meeting>(&format!(
        r#"
        UPDATE meetings
        SET recording_url = ?
        WHERE id = ?
        RETURNING {MEETING_COLUMNS}
        "#
    ))
    .bind(url)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(meeting)
}

/// Delete a meeting by ID.
pub async fn delete_meeting(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM meetings WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Meeting",
            id: id.to_string(),
        });
    }

    Ok(())
}
