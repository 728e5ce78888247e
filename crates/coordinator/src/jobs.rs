//! In-process background job queue.
//!
//! Fire-and-forget over an unbounded mpsc channel: `enqueue` succeeds
//! as soon as the channel accepts the job, and a spawned worker drains
//! the queue one job at a time. Job failures are logged and dropped,
//! never retried here.

use platform_core::{async_trait, Job, JobDispatcher, PlatformError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::summarizer::Summarizer;

/// Sending half of the job queue.
#[derive(Clone)]
pub struct JobQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl JobQueue {
    /// Create a queue and its receiving half.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Job>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl JobDispatcher for JobQueue {
    async fn enqueue(&self, job: Job) -> Result<(), PlatformError> {
        self.tx.send(job).map_err(|_| PlatformError::QueueClosed)
    }
}

/// Spawn the worker task that drains the queue.
///
/// The task ends when every [`JobQueue`] clone has been dropped.
pub fn spawn_worker(summarizer: Summarizer, mut rx: mpsc::UnboundedReceiver<Job>) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Job worker started");
        while let Some(job) = rx.recv().await {
            match job {
                Job::Summarize {
                    meeting_id,
                    transcript_url,
                } => {
                    if let Err(e) = summarizer.run(&meeting_id, &transcript_url).await {
                        error!(meeting_id = %meeting_id, "Summarization job failed: {}", e);
                    }
                }
            }
        }
        info!("Job worker stopped");
    })
}
