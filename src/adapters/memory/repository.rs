//! Volatile in-memory repositories. Process-local by design; the ports
//! let a durable store replace these without touching the pipeline.

use crate::domain::artifact::{Clip, Summary, Transcript};
use crate::domain::user::User;
use crate::domain::video::VideoRecord;
use crate::error::{Error, Result};
use crate::ports::repository::{ArtifactRepository, UserRepository, VideoRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryVideoRepository {
    records: RwLock<HashMap<Uuid, VideoRecord>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn insert(&self, record: &VideoRecord) -> Result<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(Error::Conflict(format!("video {} already exists", record.id)));
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<VideoRecord>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn update(&self, record: &VideoRecord) -> Result<bool> {
        let mut records = self.records.write().await;
        match records.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(true)
            }
            // Deleted mid-run; the caller must not resurrect it.
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<VideoRecord>> {
        let records = self.records.read().await;
        let mut owned: Vec<VideoRecord> = records
            .values()
            .filter(|r| r.owner == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(owned)
    }
}

#[derive(Default)]
pub struct InMemoryArtifactRepository {
    transcripts: RwLock<HashMap<Uuid, Transcript>>,
    summaries: RwLock<HashMap<Uuid, Summary>>,
    clips: RwLock<HashMap<Uuid, Vec<Clip>>>,
}

impl InMemoryArtifactRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArtifactRepository for InMemoryArtifactRepository {
    async fn put_transcript(&self, transcript: &Transcript) -> Result<()> {
        let mut transcripts = self.transcripts.write().await;
        if transcripts.contains_key(&transcript.video_id) {
            return Err(Error::Conflict(format!(
                "transcript for video {} already written",
                transcript.video_id
            )));
        }
        transcripts.insert(transcript.video_id, transcript.clone());
        Ok(())
    }

    async fn get_transcript(&self, video_id: Uuid) -> Result<Option<Transcript>> {
        Ok(self.transcripts.read().await.get(&video_id).cloned())
    }

    async fn put_summary(&self, summary: &Summary) -> Result<()> {
        let mut summaries = self.summaries.write().await;
        if summaries.contains_key(&summary.video_id) {
            return Err(Error::Conflict(format!(
                "summary for video {} already written",
                summary.video_id
            )));
        }
        summaries.insert(summary.video_id, summary.clone());
        Ok(())
    }

    async fn get_summary(&self, video_id: Uuid) -> Result<Option<Summary>> {
        Ok(self.summaries.read().await.get(&video_id).cloned())
    }

    async fn put_clips(&self, video_id: Uuid, clips: &[Clip]) -> Result<()> {
        let mut stored = self.clips.write().await;
        if stored.contains_key(&video_id) {
            return Err(Error::Conflict(format!(
                "clips for video {} already written",
                video_id
            )));
        }
        stored.insert(video_id, clips.to_vec());
        Ok(())
    }

    async fn get_clips(&self, video_id: Uuid) -> Result<Vec<Clip>> {
        Ok(self
            .clips
            .read()
            .await
            .get(&video_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_for_video(&self, video_id: Uuid) -> Result<()> {
        self.transcripts.write().await.remove(&video_id);
        self.summaries.write().await.remove(&video_id);
        self.clips.write().await.remove(&video_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    /// Keyed by email, the unique login handle.
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(Error::Conflict("email already registered".to_string()));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.id == id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::video::VideoSource;
    use chrono::Utc;
    use std::path::PathBuf;

    fn record(owner: Uuid) -> VideoRecord {
        VideoRecord::new(
            owner,
            "Lecture".into(),
            None,
            VideoSource::Upload {
                file_path: PathBuf::from("storage/uploads/x.mp4"),
                filename: "x.mp4".into(),
            },
        )
    }

    fn transcript(video_id: Uuid) -> Transcript {
        Transcript {
            transcript_id: Uuid::new_v4(),
            video_id,
            full_text: "text".into(),
            segments: vec![],
            language: "en".into(),
            confidence_score: 0.95,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let repo = InMemoryVideoRepository::new();
        let rec = record(Uuid::new_v4());
        repo.insert(&rec).await.unwrap();
        let fetched = repo.get(rec.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, rec.id);
        assert_eq!(fetched.title, rec.title);
    }

    #[tokio::test]
    async fn update_of_deleted_record_reports_gone() {
        let repo = InMemoryVideoRepository::new();
        let rec = record(Uuid::new_v4());
        repo.insert(&rec).await.unwrap();
        assert!(repo.delete(rec.id).await.unwrap());
        assert!(!repo.update(&rec).await.unwrap());
        assert!(repo.get(rec.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_by_owner_is_scoped() {
        let repo = InMemoryVideoRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        repo.insert(&record(alice)).await.unwrap();
        repo.insert(&record(alice)).await.unwrap();
        repo.insert(&record(bob)).await.unwrap();
        assert_eq!(repo.list_by_owner(alice).await.unwrap().len(), 2);
        assert_eq!(repo.list_by_owner(bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn artifacts_are_write_once() {
        let repo = InMemoryArtifactRepository::new();
        let video_id = Uuid::new_v4();
        repo.put_transcript(&transcript(video_id)).await.unwrap();
        let err = repo.put_transcript(&transcript(video_id)).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn artifact_reads_are_not_found_before_their_stage() {
        let repo = InMemoryArtifactRepository::new();
        let video_id = Uuid::new_v4();
        assert!(repo.get_transcript(video_id).await.unwrap().is_none());
        assert!(repo.get_summary(video_id).await.unwrap().is_none());
        assert!(repo.get_clips(video_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_for_video_cascades() {
        let repo = InMemoryArtifactRepository::new();
        let video_id = Uuid::new_v4();
        repo.put_transcript(&transcript(video_id)).await.unwrap();
        repo.delete_for_video(video_id).await.unwrap();
        assert!(repo.get_transcript(video_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("ada".into(), "ada@example.com".into(), "h".into(), "student".into());
        repo.insert(&user).await.unwrap();
        let dup = User::new("ada2".into(), "ada@example.com".into(), "h".into(), "student".into());
        assert!(matches!(repo.insert(&dup).await.unwrap_err(), Error::Conflict(_)));
        let found = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.username, "ada");
    }
}
