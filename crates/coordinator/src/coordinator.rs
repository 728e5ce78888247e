//! Event dispatch and the six lifecycle handlers.

use std::sync::Arc;

use database::{agent, meeting, Database, DatabaseError, MeetingStatus};
use platform_core::{
    CallPlatform, ChatMessage, ChatPlatform, ChatUser, Job, JobDispatcher, LanguageModel,
};
use tracing::{debug, info, warn};

use crate::cid::parse_call_cid;
use crate::error::CoordinatorError;
use crate::event::{CallPayload, EventMessage, EventUser, WebhookEvent};
use crate::prompts::chat_message_prompt;

/// How many prior channel messages feed the chat-reply context.
const CHAT_CONTEXT_MESSAGES: usize = 5;

/// Routes verified webhook events to their handlers.
///
/// Holds every collaborator as an injected dependency; nothing here is
/// an ambient singleton, so the whole coordinator runs against fakes in
/// tests. Each `handle_event` call is independent and stateless;
/// concurrent deliveries for the same meeting are serialized only by
/// the datastore's conditional updates.
pub struct Coordinator {
    db: Database,
    calls: Arc<dyn CallPlatform>,
    chat: Arc<dyn ChatPlatform>,
    llm: Arc<dyn LanguageModel>,
    jobs: Arc<dyn JobDispatcher>,
}

impl Coordinator {
    /// Create a coordinator with the given collaborators.
    pub fn new(
        db: Database,
        calls: Arc<dyn CallPlatform>,
        chat: Arc<dyn ChatPlatform>,
        llm: Arc<dyn LanguageModel>,
        jobs: Arc<dyn JobDispatcher>,
    ) -> Self {
        Self {
            db,
            calls,
            chat,
            llm,
            jobs,
        }
    }

    /// Dispatch one decoded event to exactly one handler.
    ///
    /// Unknown events succeed without side effects: the platform may
    /// introduce event kinds this coordinator does not yet understand,
    /// and rejecting them would only trigger pointless redelivery.
    pub async fn handle_event(&self, event: WebhookEvent) -> Result<(), CoordinatorError> {
        match event {
            WebhookEvent::CallSessionStarted { call } => self.handle_session_started(call).await,
            WebhookEvent::CallSessionParticipantLeft { call_cid } => {
                self.handle_participant_left(call_cid).await
            }
            WebhookEvent::CallSessionEnded { call } => self.handle_session_ended(call).await,
            WebhookEvent::CallTranscriptionReady {
                call_cid,
                call_transcription,
            } => {
                self.handle_transcription_ready(call_cid, call_transcription.url)
                    .await
            }
            WebhookEvent::CallRecordingReady {
                call_cid,
                call_recording,
            } => {
                self.handle_recording_ready(call_cid, call_recording.url)
                    .await
            }
            WebhookEvent::MessageNew {
                user,
                channel_id,
                message,
            } => self.handle_message_new(user, channel_id, message).await,
            WebhookEvent::Unknown => {
                debug!("Ignoring unrecognized event type");
                Ok(())
            }
        }
    }

    /// `call.session_started`: transition `upcoming → active` and
    /// connect the AI agent to the live call.
    async fn handle_session_started(&self, call: CallPayload) -> Result<(), CoordinatorError> {
        let meeting_id = meeting_id_from_call(&call)?;

        // Single conditional update: at most one delivery wins.
        let meeting = meeting::start_meeting(self.db.pool(), &meeting_id)
            .await?
            .ok_or_else(|| CoordinatorError::MeetingNotFound(meeting_id.clone()))?;

        let agent = self.lookup_agent(&meeting_id, &meeting.agent_id).await?;

        info!(meeting_id = %meeting_id, agent_id = %agent.id, "Meeting started, connecting agent");

        let session = self.calls.connect_agent(&meeting_id, &agent.id).await?;
        session.update_instructions(&agent.instructions).await?;

        Ok(())
    }

    /// `call.session_participant_left`: end the call. The meeting row
    /// is untouched here; the resulting `call.session_ended` event owns
    /// that transition, since the platform decides when a call is over.
    async fn handle_participant_left(
        &self,
        call_cid: Option<String>,
    ) -> Result<(), CoordinatorError> {
        let cid = call_cid
            .ok_or_else(|| CoordinatorError::BadRequest("missing call_cid".to_string()))?;
        let meeting_id = parse_call_cid(&cid)?;

        info!(meeting_id = %meeting_id, "Participant left, ending call");
        self.calls.end_call(meeting_id).await?;

        Ok(())
    }

    /// `call.session_ended`: transition `active → processing`. A stale
    /// or duplicate delivery matches zero rows and is acknowledged as a
    /// no-op, never escalated.
    async fn handle_session_ended(&self, call: CallPayload) -> Result<(), CoordinatorError> {
        let meeting_id = meeting_id_from_call(&call)?;

        match meeting::end_meeting(self.db.pool(), &meeting_id).await? {
            Some(_) => info!(meeting_id = %meeting_id, "Meeting ended, awaiting transcript"),
            None => debug!(meeting_id = %meeting_id, "Stale session_ended delivery, no-op"),
        }

        Ok(())
    }

    /// `call.transcription_ready`: record the transcript URL and
    /// enqueue the summarization job. The URL write has no status
    /// guard; the job is only enqueued for meetings that exist.
    async fn handle_transcription_ready(
        &self,
        call_cid: Option<String>,
        url: Option<String>,
    ) -> Result<(), CoordinatorError> {
        let cid = call_cid
            .ok_or_else(|| CoordinatorError::BadRequest("missing call_cid".to_string()))?;
        let meeting_id = parse_call_cid(&cid)?.to_string();
        let url = url
            .ok_or_else(|| CoordinatorError::BadRequest("missing transcript url".to_string()))?;

        let meeting = meeting::set_transcript_url(self.db.pool(), &meeting_id, &url)
            .await?
            .ok_or_else(|| CoordinatorError::MeetingNotFound(meeting_id.clone()))?;

        // The row exists and the URL is stored; if the enqueue fails the
        // platform's redelivery repeats this handler harmlessly.
        let transcript_url = meeting.transcript_url.unwrap_or(url);
        info!(meeting_id = %meeting_id, "Transcript ready, enqueueing summarization");
        self.jobs
            .enqueue(Job::Summarize {
                meeting_id,
                transcript_url,
            })
            .await?;

        Ok(())
    }

    /// `call.recording_ready`: record the recording URL. No downstream
    /// job; summarization is transcript-driven.
    async fn handle_recording_ready(
        &self,
        call_cid: Option<String>,
        url: Option<String>,
    ) -> Result<(), CoordinatorError> {
        let cid = call_cid
            .ok_or_else(|| CoordinatorError::BadRequest("missing call_cid".to_string()))?;
        let meeting_id = parse_call_cid(&cid)?;
        let url = url
            .ok_or_else(|| CoordinatorError::BadRequest("missing recording url".to_string()))?;

        meeting::set_recording_url(self.db.pool(), meeting_id, &url)
            .await?
            .ok_or_else(|| CoordinatorError::MeetingNotFound(meeting_id.to_string()))?;

        info!(meeting_id = %meeting_id, "Recording URL stored");
        Ok(())
    }

    /// `message.new`: reply in a completed meeting's channel, unless
    /// the sender is the agent itself (its own messages echo back
    /// through this webhook and must not trigger a reply loop).
    async fn handle_message_new(
        &self,
        user: Option<EventUser>,
        channel_id: Option<String>,
        message: Option<EventMessage>,
    ) -> Result<(), CoordinatorError> {
        let sender_id = user
            .map(|u| u.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CoordinatorError::BadRequest("missing sender id".to_string()))?;
        let meeting_id = channel_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CoordinatorError::BadRequest("missing channel id".to_string()))?;
        let text = message
            .and_then(|m| m.text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CoordinatorError::BadRequest("missing message text".to_string()))?;

        // Chat replies only make sense once a summary exists.
        let meeting =
            meeting::get_meeting_in_status(self.db.pool(), &meeting_id, MeetingStatus::Completed)
                .await?
                .ok_or_else(|| CoordinatorError::MeetingNotFound(meeting_id.clone()))?;

        let agent = self.lookup_agent(&meeting_id, &meeting.agent_id).await?;

        if sender_id == agent.id {
            debug!(meeting_id = %meeting_id, "Skipping agent's own message");
            return Ok(());
        }

        let system = chat_message_prompt(
            meeting.summary.as_deref().unwrap_or(""),
            &agent.instructions,
        );

        let history = self
            .chat
            .recent_messages(&meeting_id, CHAT_CONTEXT_MESSAGES)
            .await?;
        let mut messages: Vec<ChatMessage> = history
            .iter()
            .filter(|m| !m.text.trim().is_empty())
            .map(|m| {
                if m.sender_id == agent.id {
                    ChatMessage::assistant(&m.text)
                } else {
                    ChatMessage::user(&m.text)
                }
            })
            .collect();
        messages.push(ChatMessage::user(&text));

        // EmptyCompletion propagates: never post a blank reply.
        let reply = self.llm.complete(&system, &messages).await?;

        let chat_user = ChatUser {
            id: agent.id.clone(),
            name: agent.name.clone(),
        };
        self.chat.upsert_user(&chat_user).await?;
        self.chat
            .send_message(&meeting_id, &reply, &chat_user)
            .await?;

        info!(meeting_id = %meeting_id, agent_id = %agent.id, "Posted agent chat reply");
        Ok(())
    }

    /// Fetch a meeting's agent, distinguishing the dangling-reference
    /// integrity fault from ordinary not-found handling.
    async fn lookup_agent(
        &self,
        meeting_id: &str,
        agent_id: &str,
    ) -> Result<database::Agent, CoordinatorError> {
        match agent::get_agent(self.db.pool(), agent_id).await {
            Ok(agent) => Ok(agent),
            Err(DatabaseError::NotFound { .. }) => {
                warn!(meeting_id = %meeting_id, agent_id = %agent_id, "Meeting references a missing agent");
                Err(CoordinatorError::AgentMissing {
                    meeting_id: meeting_id.to_string(),
                    agent_id: agent_id.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn meeting_id_from_call(call: &CallPayload) -> Result<String, CoordinatorError> {
    call.custom
        .as_ref()
        .and_then(|c| c.meeting_id.clone())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            CoordinatorError::BadRequest("meeting id not found in call metadata".to_string())
        })
}
