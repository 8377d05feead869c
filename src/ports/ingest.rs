use crate::domain::video::{MediaHandle, VideoSource};
use crate::error::Result;
use async_trait::async_trait;

/// Acquires source media. Given an uploaded file or a remote URL, yields
/// a local media handle plus metadata, or fails with an ingestion error
/// that the pipeline runner records on the video.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaIngestPort: Send + Sync {
    async fn acquire(&self, source: &VideoSource) -> Result<MediaHandle>;
}
