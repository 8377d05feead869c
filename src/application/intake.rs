use crate::domain::job::{Job, ProcessVideoJob};
use crate::domain::video::{VideoRecord, VideoSource};
use crate::error::{Error, Result};
use crate::ports::queue::JobQueuePort;
use crate::ports::repository::VideoRepository;
use regex::Regex;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::OnceLock;
use uuid::Uuid;

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^https?://\S+$").unwrap())
}

/// Submission orchestrator: creates the record in its initial state and
/// enqueues the processing job. Returns immediately; the pipeline runs
/// on the worker pool.
pub struct IntakeService {
    videos: Arc<dyn VideoRepository>,
    queue: Arc<dyn JobQueuePort>,
}

impl IntakeService {
    pub fn new(videos: Arc<dyn VideoRepository>, queue: Arc<dyn JobQueuePort>) -> Self {
        Self { videos, queue }
    }

    pub async fn submit_upload(
        &self,
        owner: Uuid,
        title: String,
        description: Option<String>,
        file_path: PathBuf,
        filename: String,
    ) -> Result<VideoRecord> {
        let source = VideoSource::Upload {
            file_path,
            filename,
        };
        self.submit(VideoRecord::new(owner, title, description, source))
            .await
    }

    pub async fn submit_remote(
        &self,
        owner: Uuid,
        title: String,
        description: Option<String>,
        url: &str,
    ) -> Result<VideoRecord> {
        if !url_pattern().is_match(url) {
            return Err(Error::InvalidRequest(format!(
                "not an http(s) URL: {}",
                url
            )));
        }
        let source = VideoSource::RemoteUrl {
            url: url.to_string(),
        };
        self.submit(VideoRecord::new(owner, title, description, source))
            .await
    }

    async fn submit(&self, record: VideoRecord) -> Result<VideoRecord> {
        self.videos.insert(&record).await?;
        let job = Job::ProcessVideo(ProcessVideoJob::for_video(record.id));
        if let Err(e) = self.queue.enqueue_job(job).await {
            // Backpressure surfaces synchronously; drop the half-created
            // record so retries start clean.
            let _ = self.videos.delete(record.id).await;
            return Err(e);
        }
        tracing::info!(video_id = %record.id, source = record.source.label(), "video submitted");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryJobQueue, InMemoryVideoRepository};
    use crate::domain::video::ProcessingStatus;

    fn service(capacity: usize) -> (Arc<InMemoryVideoRepository>, Arc<InMemoryJobQueue>, IntakeService) {
        let videos = Arc::new(InMemoryVideoRepository::new());
        let queue = Arc::new(InMemoryJobQueue::new(capacity));
        let intake = IntakeService::new(videos.clone(), queue.clone());
        (videos, queue, intake)
    }

    #[tokio::test]
    async fn upload_submission_is_queued_at_zero_and_enqueued() {
        let (videos, queue, intake) = service(8);
        let owner = Uuid::new_v4();

        let record = intake
            .submit_upload(
                owner,
                "Lecture".into(),
                None,
                PathBuf::from("storage/uploads/x.mp4"),
                "x.mp4".into(),
            )
            .await
            .unwrap();

        assert_eq!(record.status, ProcessingStatus::Queued);
        assert_eq!(record.progress, 0);
        assert!(videos.get(record.id).await.unwrap().is_some());

        let Some(Job::ProcessVideo(job)) = queue.dequeue_job(1.0).await.unwrap() else {
            panic!("expected a queued processing job");
        };
        assert_eq!(job.video_id, record.id);
    }

    #[tokio::test]
    async fn remote_submission_starts_downloading() {
        let (_videos, _queue, intake) = service(8);
        let record = intake
            .submit_remote(
                Uuid::new_v4(),
                "Talk".into(),
                Some("conference".into()),
                "https://example.com/watch?v=xyz",
            )
            .await
            .unwrap();
        assert_eq!(record.status, ProcessingStatus::Downloading);
    }

    #[tokio::test]
    async fn non_http_url_is_rejected() {
        let (_videos, _queue, intake) = service(8);
        for url in ["ftp://example.com/a.mp4", "example.com/a", "not a url"] {
            let err = intake
                .submit_remote(Uuid::new_v4(), "Talk".into(), None, url)
                .await
                .unwrap_err();
            assert!(matches!(err, Error::InvalidRequest(_)), "url: {}", url);
        }
    }

    #[tokio::test]
    async fn full_queue_rejects_submission_and_removes_the_record() {
        let (videos, _queue, intake) = service(1);
        intake
            .submit_upload(
                Uuid::new_v4(),
                "First".into(),
                None,
                PathBuf::from("a.mp4"),
                "a.mp4".into(),
            )
            .await
            .unwrap();

        let owner = Uuid::new_v4();
        let err = intake
            .submit_upload(
                owner,
                "Second".into(),
                None,
                PathBuf::from("b.mp4"),
                "b.mp4".into(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Queue(_)));

        // The rejected submission leaves no record behind.
        assert!(videos.list_by_owner(owner).await.unwrap().is_empty());
    }
}
