use crate::domain::artifact::{Clip, Summary, Transcript};
use crate::domain::user::User;
use crate::domain::video::VideoRecord;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage for video processing records. In-memory in this deployment;
/// the trait exists so a persistent backing store can be substituted
/// without touching pipeline logic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Insert a freshly submitted record.
    async fn insert(&self, record: &VideoRecord) -> Result<()>;

    /// Fetch a record by id.
    async fn get(&self, id: Uuid) -> Result<Option<VideoRecord>>;

    /// Overwrite an existing record. Returns false when the record no
    /// longer exists, so a runner never resurrects a deleted video.
    async fn update(&self, record: &VideoRecord) -> Result<bool>;

    /// Remove a record. Returns false when it was already gone.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// All records submitted by one user, newest first.
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<VideoRecord>>;
}

/// Storage for stage artifacts, keyed by the owning video id.
/// Write-once per video per artifact type.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    async fn put_transcript(&self, transcript: &Transcript) -> Result<()>;
    async fn get_transcript(&self, video_id: Uuid) -> Result<Option<Transcript>>;

    async fn put_summary(&self, summary: &Summary) -> Result<()>;
    async fn get_summary(&self, video_id: Uuid) -> Result<Option<Summary>>;

    async fn put_clips(&self, video_id: Uuid, clips: &[Clip]) -> Result<()>;
    async fn get_clips(&self, video_id: Uuid) -> Result<Vec<Clip>>;

    /// Cascade removal of every artifact owned by a video.
    async fn delete_for_video(&self, video_id: Uuid) -> Result<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with a conflict when the email is taken.
    async fn insert(&self, user: &User) -> Result<()>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
}
