//! Bounded in-process job queue.

use crate::domain::job::Job;
use crate::error::{Error, Result};
use crate::ports::queue::JobQueuePort;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::{channel, Receiver, Sender};
use tokio::sync::Mutex;

/// Channel-backed queue with a fixed capacity. `enqueue_job` never
/// blocks: a full queue is surfaced as backpressure to the submitter.
pub struct InMemoryJobQueue {
    sender: Sender<Job>,
    // Workers share one consumer side.
    receiver: Mutex<Receiver<Job>>,
}

impl InMemoryJobQueue {
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = channel(capacity);
        Self {
            sender,
            receiver: Mutex::new(receiver),
        }
    }
}

#[async_trait]
impl JobQueuePort for InMemoryJobQueue {
    async fn enqueue_job(&self, job: Job) -> Result<()> {
        self.sender.try_send(job).map_err(|e| match e {
            TrySendError::Full(_) => Error::Queue("job queue is full".to_string()),
            TrySendError::Closed(_) => Error::Queue("job queue is closed".to_string()),
        })
    }

    async fn dequeue_job(&self, timeout_secs: f64) -> Result<Option<Job>> {
        let mut receiver = self.receiver.lock().await;
        if timeout_secs <= 0.0 {
            return Ok(receiver.recv().await);
        }
        match tokio::time::timeout(Duration::from_secs_f64(timeout_secs), receiver.recv()).await {
            Ok(job) => Ok(job),
            Err(_) => Ok(None),
        }
    }
}
