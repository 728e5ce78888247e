//! Error types for platform collaborators.

use thiserror::Error;

/// Errors that can occur when talking to an external platform.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// HTTP transport failure (connect, timeout, body read).
    #[error("http error: {0}")]
    Http(String),

    /// The platform returned a non-success status.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Webhook signature did not verify.
    #[error("invalid webhook signature")]
    Signature,

    /// The language model returned no usable content.
    #[error("empty completion from language model")]
    EmptyCompletion,

    /// Client was constructed or configured incorrectly.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The job queue is no longer accepting work.
    #[error("job queue closed")]
    QueueClosed,
}
