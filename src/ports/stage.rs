//! Stage engine seams. The simulated adapters behind these traits can be
//! swapped for real speech-to-text / NLP / transcoding implementations
//! without touching the state machine or progress contract.

use crate::domain::artifact::{Clip, Summary, Transcript};
use crate::domain::video::MediaHandle;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, video_id: Uuid, media: &MediaHandle) -> Result<Transcript>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    async fn summarize(&self, video_id: Uuid, transcript: &Transcript) -> Result<Summary>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClipEngine: Send + Sync {
    /// One clip per summary topic.
    async fn generate_clips(&self, video_id: Uuid, summary: &Summary) -> Result<Vec<Clip>>;
}
