//! Fake job dispatcher.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use platform_core::{async_trait, Job, JobDispatcher, PlatformError};

/// A [`JobDispatcher`] fake collecting enqueued jobs.
pub struct MockJobDispatcher {
    jobs: Mutex<Vec<Job>>,
    fail: AtomicBool,
}

impl MockJobDispatcher {
    /// Create a fake that accepts every job.
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    /// Make subsequent enqueues fail as if the queue were closed.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Jobs accepted so far, in order.
    pub fn jobs(&self) -> Vec<Job> {
        self.jobs.lock().unwrap().clone()
    }
}

impl Default for MockJobDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobDispatcher for MockJobDispatcher {
    async fn enqueue(&self, job: Job) -> Result<(), PlatformError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PlatformError::QueueClosed);
        }
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collects_jobs_and_failure_mode() {
        let dispatcher = MockJobDispatcher::new();

        let job = Job::Summarize {
            meeting_id: "m1".to_string(),
            transcript_url: "u".to_string(),
        };
        dispatcher.enqueue(job.clone()).await.unwrap();
        assert_eq!(dispatcher.jobs(), vec![job.clone()]);

        dispatcher.set_fail(true);
        assert!(matches!(
            dispatcher.enqueue(job).await,
            Err(PlatformError::QueueClosed)
        ));
        assert_eq!(dispatcher.jobs().len(), 1);
    }
}
