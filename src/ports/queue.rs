use crate::domain::job::Job;
use crate::error::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobQueuePort: Send + Sync {
    /// Enqueue a job. A full queue is reported synchronously so the
    /// submission caller sees backpressure instead of unbounded buffering.
    async fn enqueue_job(&self, job: Job) -> Result<()>;

    /// Dequeue a job (blocking with timeout or non-blocking)
    /// timeout_secs: 0.0 for infinite, >0.0 for specific timeout
    async fn dequeue_job(&self, timeout_secs: f64) -> Result<Option<Job>>;
}
