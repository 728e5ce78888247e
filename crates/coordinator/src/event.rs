//! Typed webhook events.
//!
//! The platform tags every payload with a `type` string. Decoding is a
//! closed tagged union: recognized tags map to a variant, everything
//! else lands in [`WebhookEvent::Unknown`] and is acknowledged as a
//! no-op, so new platform event kinds never break this endpoint.
//!
//! Field-level validation (missing meeting id, blank message text) is
//! deliberately left to the handlers: a recognized tag with a defective
//! body is a bad request, not a decode failure.

use serde::Deserialize;

/// An inbound event from the call/chat platform.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum WebhookEvent {
    /// A call session began.
    #[serde(rename = "call.session_started")]
    CallSessionStarted {
        #[serde(default)]
        call: CallPayload,
    },

    /// A participant left the call.
    #[serde(rename = "call.session_participant_left")]
    CallSessionParticipantLeft {
        #[serde(default)]
        call_cid: Option<String>,
    },

    /// The call session ended.
    #[serde(rename = "call.session_ended")]
    CallSessionEnded {
        #[serde(default)]
        call: CallPayload,
    },

    /// The transcript artifact is ready for download.
    #[serde(rename = "call.transcription_ready")]
    CallTranscriptionReady {
        #[serde(default)]
        call_cid: Option<String>,
        #[serde(default)]
        call_transcription: TranscriptionPayload,
    },

    /// The recording artifact is ready for download.
    #[serde(rename = "call.recording_ready")]
    CallRecordingReady {
        #[serde(default)]
        call_cid: Option<String>,
        #[serde(default)]
        call_recording: RecordingPayload,
    },

    /// A new message was posted in a chat channel.
    #[serde(rename = "message.new")]
    MessageNew {
        #[serde(default)]
        user: Option<EventUser>,
        #[serde(default)]
        channel_id: Option<String>,
        #[serde(default)]
        message: Option<EventMessage>,
    },

    /// Any event kind this coordinator does not understand.
    #[serde(other)]
    Unknown,
}

/// Decode a raw webhook body.
///
/// Invalid JSON is an error (the delivery is rejected with 400). A JSON
/// object without a string `type` field is not: the platform owns the
/// envelope format, and anything we cannot name routes to
/// [`WebhookEvent::Unknown`] and is acknowledged.
pub fn decode_event(body: &[u8]) -> Result<WebhookEvent, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_slice(body)?;

    let has_tag = value
        .get("type")
        .map(serde_json::Value::is_string)
        .unwrap_or(false);
    if !has_tag {
        return Ok(WebhookEvent::Unknown);
    }

    serde_json::from_value(value)
}

/// Call descriptor carried by session events.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallPayload {
    /// Custom metadata attached at call creation.
    #[serde(default)]
    pub custom: Option<CustomData>,
}

/// Custom call metadata; the meeting id is stored here at creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomData {
    #[serde(rename = "meetingId", default)]
    pub meeting_id: Option<String>,
}

/// Transcript artifact reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptionPayload {
    #[serde(default)]
    pub url: Option<String>,
}

/// Recording artifact reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordingPayload {
    #[serde(default)]
    pub url: Option<String>,
}

/// Sender identity on a chat event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventUser {
    pub id: String,
}

/// Message body on a chat event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventMessage {
    #[serde(default)]
    pub text: Option<String>,
}
