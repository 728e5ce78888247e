//! Background transcript summarization.
//!
//! Consumes a `{meeting_id, transcript_url}` job: fetches the JSONL
//! transcript, attaches speaker display names, asks the LLM for a
//! summary, and completes the meeting. Best effort and at most once:
//! any failure ends the invocation with a log line, and recovery is the
//! platform redelivering `call.transcription_ready`.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use database::{agent, meeting, user, Database};
use platform_core::{ChatMessage, LanguageModel, PlatformError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::CoordinatorError;
use crate::prompts::SUMMARY_SYSTEM_PROMPT;

/// Timeout for downloading the transcript artifact.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Placeholder for speakers found in neither the user nor agent table.
const UNKNOWN_SPEAKER: &str = "Unknown";

/// One record of the newline-delimited JSON transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptItem {
    pub speaker_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub start_ts: f64,
    pub stop_ts: f64,
}

/// A transcript record enriched with the speaker's display name.
#[derive(Debug, Clone, Serialize)]
struct SpeakerItem {
    speaker_name: String,
    #[serde(flatten)]
    item: TranscriptItem,
}

/// Parse a newline-delimited JSON transcript. Blank lines are skipped;
/// a malformed line fails the whole parse.
pub fn parse_transcript(raw: &str) -> Result<Vec<TranscriptItem>, CoordinatorError> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            serde_json::from_str(line)
                .map_err(|e| CoordinatorError::Transcript(format!("malformed line: {}", e)))
        })
        .collect()
}

/// Runs summarization jobs against the datastore and an LLM.
pub struct Summarizer {
    db: Database,
    llm: Arc<dyn LanguageModel>,
    http: reqwest::Client,
}

impl Summarizer {
    /// Create a summarizer.
    pub fn new(db: Database, llm: Arc<dyn LanguageModel>) -> Result<Self, CoordinatorError> {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| {
                CoordinatorError::Platform(PlatformError::Configuration(format!(
                    "Failed to create HTTP client: {}",
                    e
                )))
            })?;

        Ok(Self { db, llm, http })
    }

    /// Run one summarization job to completion.
    pub async fn run(
        &self,
        meeting_id: &str,
        transcript_url: &str,
    ) -> Result<(), CoordinatorError> {
        info!(meeting_id = %meeting_id, "Summarizing transcript");

        let raw = self.fetch_transcript(transcript_url).await?;
        let items = parse_transcript(&raw)?;
        let enriched = self.resolve_speakers(items).await?;

        let body = serde_json::to_string(&enriched)
            .map_err(|e| CoordinatorError::Transcript(e.to_string()))?;
        let prompt = format!("Summarize the following transcript: {body}");

        let summary = self
            .llm
            .complete(SUMMARY_SYSTEM_PROMPT, &[ChatMessage::user(prompt)])
            .await?;

        match meeting::complete_meeting(self.db.pool(), meeting_id, &summary).await? {
            Some(_) => info!(meeting_id = %meeting_id, "Meeting completed with summary"),
            None => {
                // A cancelled or already-completed meeting cannot be
                // resurrected by a stale job.
                warn!(meeting_id = %meeting_id, "Meeting no longer processing, summary discarded");
            }
        }

        Ok(())
    }

    async fn fetch_transcript(&self, url: &str) -> Result<String, CoordinatorError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CoordinatorError::Transcript(format!("fetch failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoordinatorError::Transcript(format!(
                "fetch failed with status {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| CoordinatorError::Transcript(format!("fetch failed: {}", e)))
    }

    /// Attach display names by resolving each distinct speaker id
    /// against the user table, then the agent table.
    async fn resolve_speakers(
        &self,
        items: Vec<TranscriptItem>,
    ) -> Result<Vec<SpeakerItem>, CoordinatorError> {
        let speaker_ids: Vec<String> = items
            .iter()
            .map(|i| i.speaker_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut names: HashMap<String, String> = HashMap::new();
        for u in user::get_users_by_ids(self.db.pool(), &speaker_ids).await? {
            names.insert(u.id, u.name);
        }
        for a in agent::get_agents_by_ids(self.db.pool(), &speaker_ids).await? {
            names.entry(a.id).or_insert(a.name);
        }

        Ok(items
            .into_iter()
            .map(|item| SpeakerItem {
                speaker_name: names
                    .get(&item.speaker_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string()),
                item,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::models::{Agent as AgentRow, User};

    #[test]
    fn test_parse_transcript() {
        let raw = concat!(
            r#"{"speaker_id":"u1","type":"speech","text":"hello","start_ts":0.0,"stop_ts":1.5}"#,
            "\n\n",
            r#"{"speaker_id":"a1","type":"speech","text":"hi","start_ts":1.5,"stop_ts":2.0}"#,
            "\n",
        );
        let items = parse_transcript(raw).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].speaker_id, "u1");
        assert_eq!(items[1].text, "hi");
    }

    #[test]
    fn test_parse_transcript_rejects_malformed_line() {
        let raw = "{\"speaker_id\":\"u1\",\"type\":\"speech\",\"text\":\"x\",\"start_ts\":0,\"stop_ts\":1}\nnot json\n";
        assert!(matches!(
            parse_transcript(raw),
            Err(CoordinatorError::Transcript(_))
        ));
    }

    #[test]
    fn test_parse_transcript_empty_input() {
        assert!(parse_transcript("").unwrap().is_empty());
        assert!(parse_transcript("\n\n").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_speakers() {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1).await.unwrap();
        db.migrate().await.unwrap();

        user::create_user(
            db.pool(),
            &User {
                id: "u1".to_string(),
                name: "Alice".to_string(),
            },
        )
        .await
        .unwrap();
        agent::create_agent(
            db.pool(),
            &AgentRow {
                id: "a1".to_string(),
                name: "Notetaker".to_string(),
                instructions: String::new(),
                user_id: "u1".to_string(),
            },
        )
        .await
        .unwrap();

        let llm = Arc::new(mock_platform::MockLanguageModel::replying("s"));
        let summarizer = Summarizer::new(db, llm).unwrap();

        let items = vec![
            TranscriptItem {
                speaker_id: "u1".to_string(),
                kind: "speech".to_string(),
                text: "hello".to_string(),
                start_ts: 0.0,
                stop_ts: 1.0,
            },
            TranscriptItem {
                speaker_id: "a1".to_string(),
                kind: "speech".to_string(),
                text: "hi".to_string(),
                start_ts: 1.0,
                stop_ts: 2.0,
            },
            TranscriptItem {
                speaker_id: "ghost".to_string(),
                kind: "speech".to_string(),
                text: "...".to_string(),
                start_ts: 2.0,
                stop_ts: 3.0,
            },
        ];

        let enriched = summarizer.resolve_speakers(items).await.unwrap();
        assert_eq!(enriched[0].speaker_name, "Alice");
        assert_eq!(enriched[1].speaker_name, "Notetaker");
        assert_eq!(enriched[2].speaker_name, "Unknown");
    }

    #[test]
    fn test_speaker_item_flattens() {
        let item = SpeakerItem {
            speaker_name: "Alice".to_string(),
            item: TranscriptItem {
                speaker_id: "u1".to_string(),
                kind: "speech".to_string(),
                text: "hello".to_string(),
                start_ts: 0.0,
                stop_ts: 1.0,
            },
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["speaker_name"], "Alice");
        assert_eq!(json["speaker_id"], "u1");
        assert_eq!(json["type"], "speech");
    }
}
