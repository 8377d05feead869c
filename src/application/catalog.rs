use crate::domain::artifact::{Clip, Summary, Transcript};
use crate::domain::video::{ProcessingStatus, VideoRecord, VideoSource};
use crate::error::{Error, Result};
use crate::ports::repository::{ArtifactRepository, VideoRepository};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

const DASHBOARD_RECENT_LIMIT: usize = 5;

#[derive(Debug, Serialize)]
pub struct StatusView {
    pub video_id: Uuid,
    pub status: ProcessingStatus,
    pub progress: u8,
    pub title: String,
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VideoOverview {
    pub video_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: ProcessingStatus,
    pub progress: u8,
    pub submitted_at: DateTime<Utc>,
    pub source: &'static str,
    pub views: u64,
}

impl From<&VideoRecord> for VideoOverview {
    fn from(record: &VideoRecord) -> Self {
        Self {
            video_id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            status: record.status,
            progress: record.progress,
            submitted_at: record.submitted_at,
            source: record.source.label(),
            views: record.views,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClipsView {
    pub clips: Vec<Clip>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub total_videos: usize,
    pub completed_videos: usize,
    pub processing_videos: usize,
    pub total_clips: usize,
    pub total_views: u64,
    pub recent_videos: Vec<VideoOverview>,
}

/// Owner-scoped read side plus cascade delete. Every per-video lookup
/// verifies ownership: unknown ids are NotFound, foreign ids Forbidden.
pub struct CatalogService {
    videos: Arc<dyn VideoRepository>,
    artifacts: Arc<dyn ArtifactRepository>,
}

impl CatalogService {
    pub fn new(videos: Arc<dyn VideoRepository>, artifacts: Arc<dyn ArtifactRepository>) -> Self {
        Self { videos, artifacts }
    }

    async fn owned(&self, owner: Uuid, video_id: Uuid) -> Result<VideoRecord> {
        let record = self
            .videos
            .get(video_id)
            .await?
            .ok_or(Error::NotFound("video"))?;
        if record.owner != owner {
            return Err(Error::Forbidden);
        }
        Ok(record)
    }

    pub async fn status(&self, owner: Uuid, video_id: Uuid) -> Result<StatusView> {
        let record = self.owned(owner, video_id).await?;
        Ok(StatusView {
            video_id: record.id,
            status: record.status,
            progress: record.progress,
            title: record.title.clone(),
            source: record.source.label(),
            error: record.error,
        })
    }

    pub async fn transcript(&self, owner: Uuid, video_id: Uuid) -> Result<Transcript> {
        self.owned(owner, video_id).await?;
        self.artifacts
            .get_transcript(video_id)
            .await?
            .ok_or(Error::NotFound("transcript"))
    }

    pub async fn summary(&self, owner: Uuid, video_id: Uuid) -> Result<Summary> {
        self.owned(owner, video_id).await?;
        self.artifacts
            .get_summary(video_id)
            .await?
            .ok_or(Error::NotFound("summary"))
    }

    pub async fn clips(&self, owner: Uuid, video_id: Uuid) -> Result<ClipsView> {
        self.owned(owner, video_id).await?;
        let clips = self.artifacts.get_clips(video_id).await?;
        Ok(ClipsView {
            total: clips.len(),
            clips,
        })
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<VideoOverview>> {
        let records = self.videos.list_by_owner(owner).await?;
        Ok(records.iter().map(VideoOverview::from).collect())
    }

    pub async fn dashboard(&self, owner: Uuid) -> Result<DashboardView> {
        let records = self.videos.list_by_owner(owner).await?;
        let completed = records
            .iter()
            .filter(|r| r.status == ProcessingStatus::Complete)
            .count();
        Ok(DashboardView {
            total_videos: records.len(),
            completed_videos: completed,
            processing_videos: records.len() - completed,
            total_clips: records.iter().map(|r| r.clip_ids.len()).sum(),
            total_views: records.iter().map(|r| r.views).sum(),
            recent_videos: records
                .iter()
                .take(DASHBOARD_RECENT_LIMIT)
                .map(VideoOverview::from)
                .collect(),
        })
    }

    /// Remove the record, its stored media files, and every artifact.
    pub async fn delete(&self, owner: Uuid, video_id: Uuid) -> Result<()> {
        let record = self.owned(owner, video_id).await?;
        // Media can sit in two places: the upload stored at submission
        // and the handle produced by ingestion. Both removals are best
        // effort; a missing file is not an error.
        if let VideoSource::Upload { file_path, .. } = &record.source {
            let _ = tokio::fs::remove_file(file_path).await;
        }
        if let Some(media) = &record.media {
            let _ = tokio::fs::remove_file(&media.file_path).await;
        }
        self.artifacts.delete_for_video(video_id).await?;
        self.videos.delete(video_id).await?;
        tracing::info!(video_id = %video_id, "video deleted");
        Ok(())
    }
}
