//! Webhook event router and meeting lifecycle coordinator.
//!
//! The external call platform delivers signed events at least once and
//! possibly out of order. This crate decodes each event into a closed
//! [`WebhookEvent`] sum type, dispatches it to exactly one handler, and
//! applies conditional status transitions to the meeting record.
//! Idempotency comes entirely from the datastore's compare-and-set
//! updates; there is no in-process locking.
//!
//! The lifecycle:
//!
//! ```text
//! upcoming --started--> active --ended--> processing --summary--> completed
//!     \--cancel--> cancelled
//! ```
//!
//! Two handlers trigger downstream work: `call.session_started` connects
//! an AI participant to the live call, and `call.transcription_ready`
//! enqueues the background summarization job.

mod cid;
mod coordinator;
mod error;
mod event;
mod jobs;
pub mod prompts;
mod summarizer;

pub use cid::{parse_call_cid, CidParseError};
pub use coordinator::Coordinator;
pub use error::CoordinatorError;
pub use event::{
    decode_event, CallPayload, CustomData, EventMessage, EventUser, RecordingPayload,
    TranscriptionPayload, WebhookEvent,
};
pub use jobs::{spawn_worker, JobQueue};
pub use summarizer::{parse_transcript, Summarizer, TranscriptItem};
