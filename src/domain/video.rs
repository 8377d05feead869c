use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Where the source media came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VideoSource {
    Upload {
        /// Path of the stored upload inside the upload directory.
        file_path: PathBuf,
        filename: String,
    },
    RemoteUrl {
        url: String,
    },
}

impl VideoSource {
    pub fn label(&self) -> &'static str {
        match self {
            VideoSource::Upload { .. } => "upload",
            VideoSource::RemoteUrl { .. } => "remote_url",
        }
    }
}

/// Linear processing state. `downloading` occurs only for remote sources;
/// `complete` and `failed` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Queued,
    Downloading,
    Transcribing,
    Analyzing,
    GeneratingClips,
    Complete,
    Failed,
}

impl ProcessingStatus {
    /// Coarse progress checkpoint for this stage, consumable by a
    /// polling client.
    pub fn checkpoint(&self) -> u8 {
        match self {
            ProcessingStatus::Queued => 0,
            ProcessingStatus::Downloading => 0,
            ProcessingStatus::Transcribing => 20,
            ProcessingStatus::Analyzing => 50,
            ProcessingStatus::GeneratingClips => 80,
            ProcessingStatus::Complete => 100,
            ProcessingStatus::Failed => 0,
        }
    }

    /// Position in the linear stage order. `Failed` has no position.
    pub fn rank(&self) -> Option<u8> {
        match self {
            ProcessingStatus::Queued => Some(0),
            ProcessingStatus::Downloading => Some(1),
            ProcessingStatus::Transcribing => Some(2),
            ProcessingStatus::Analyzing => Some(3),
            ProcessingStatus::GeneratingClips => Some(4),
            ProcessingStatus::Complete => Some(5),
            ProcessingStatus::Failed => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessingStatus::Complete | ProcessingStatus::Failed)
    }
}

/// Metadata yielded by the ingestion adapter once source media has been
/// acquired.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaHandle {
    pub file_path: PathBuf,
    pub title: Option<String>,
    pub duration_secs: f64,
    pub thumbnail: Option<String>,
}

/// One video's end-to-end processing record. Mutated exclusively by the
/// pipeline runner after submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub source: VideoSource,
    pub status: ProcessingStatus,
    pub progress: u8,
    pub error: Option<String>,
    pub clip_ids: Vec<Uuid>,
    pub media: Option<MediaHandle>,
    pub submitted_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub views: u64,
}

impl VideoRecord {
    /// Create a record in its initial state: `queued` for uploads,
    /// `downloading` for remote sources. Progress starts at 0.
    pub fn new(owner: Uuid, title: String, description: Option<String>, source: VideoSource) -> Self {
        let status = match source {
            VideoSource::Upload { .. } => ProcessingStatus::Queued,
            VideoSource::RemoteUrl { .. } => ProcessingStatus::Downloading,
        };
        Self {
            id: Uuid::new_v4(),
            owner,
            title,
            description,
            source,
            status,
            progress: 0,
            error: None,
            clip_ids: Vec::new(),
            media: None,
            submitted_at: Utc::now(),
            processed_at: None,
            views: 0,
        }
    }

    /// Move to the next stage. Progress never decreases: a checkpoint
    /// below the current value leaves it untouched.
    pub fn advance(&mut self, status: ProcessingStatus) {
        debug_assert!(!self.status.is_terminal());
        self.status = status;
        self.progress = self.progress.max(status.checkpoint());
    }

    /// Record successful ingestion: media handle stored, progress bumped
    /// past the download window.
    pub fn ingested(&mut self, media: MediaHandle) {
        if matches!(self.source, VideoSource::RemoteUrl { .. }) {
            self.progress = self.progress.max(10);
        }
        self.media = Some(media);
    }

    /// Terminal success: all clips recorded, progress pinned at 100.
    pub fn complete(&mut self, clip_ids: Vec<Uuid>) {
        self.status = ProcessingStatus::Complete;
        self.progress = 100;
        self.clip_ids = clip_ids;
        self.processed_at = Some(Utc::now());
    }

    /// Terminal failure. Progress freezes at its last checkpoint so a
    /// polling client can see how far the pipeline got.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.status = ProcessingStatus::Failed;
        self.error = Some(reason.into());
    }
}
