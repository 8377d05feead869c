use crate::domain::job::{Job, ProcessVideoJob};
use crate::domain::video::{ProcessingStatus, VideoRecord};
use crate::error::{Error, Result};
use crate::ports::ingest::MediaIngestPort;
use crate::ports::queue::JobQueuePort;
use crate::ports::repository::{ArtifactRepository, VideoRepository};
use crate::ports::stage::{AnalysisEngine, ClipEngine, TranscriptionEngine};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const DEQUEUE_TIMEOUT_SECS: f64 = 5.0;

/// Pipeline runner. Consumes jobs from the queue and drives each video
/// through ingestion → transcribe → analyze → generate clips. This is
/// the only component that transitions video status.
pub struct WorkerService {
    videos: Arc<dyn VideoRepository>,
    artifacts: Arc<dyn ArtifactRepository>,
    queue: Arc<dyn JobQueuePort>,
    ingest: Arc<dyn MediaIngestPort>,
    transcriber: Arc<dyn TranscriptionEngine>,
    analyzer: Arc<dyn AnalysisEngine>,
    clipper: Arc<dyn ClipEngine>,
    /// When set, a stage exceeding this duration fails the job.
    stage_timeout: Option<Duration>,
}

impl WorkerService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        videos: Arc<dyn VideoRepository>,
        artifacts: Arc<dyn ArtifactRepository>,
        queue: Arc<dyn JobQueuePort>,
        ingest: Arc<dyn MediaIngestPort>,
        transcriber: Arc<dyn TranscriptionEngine>,
        analyzer: Arc<dyn AnalysisEngine>,
        clipper: Arc<dyn ClipEngine>,
        stage_timeout: Option<Duration>,
    ) -> Self {
        Self {
            videos,
            artifacts,
            queue,
            ingest,
            transcriber,
            analyzer,
            clipper,
            stage_timeout,
        }
    }

    pub async fn run_worker_loop(&self, worker_id: usize) {
        tracing::info!(worker_id, "worker started");
        loop {
            match self.queue.dequeue_job(DEQUEUE_TIMEOUT_SECS).await {
                Ok(Some(Job::ProcessVideo(job))) => {
                    if let Err(e) = self.run(&job).await {
                        tracing::error!(worker_id, video_id = %job.video_id, error = %e, "job failed");
                    }
                }
                Ok(None) => continue,
                Err(e) => {
                    tracing::error!(worker_id, error = %e, "queue error");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }

    /// Run the pipeline for one video. Stage failures are converted into
    /// a terminal `failed` status; only repository errors propagate.
    pub async fn run(&self, job: &ProcessVideoJob) -> Result<()> {
        let Some(mut record) = self.videos.get(job.video_id).await? else {
            // Deleted between submission and pickup.
            tracing::debug!(video_id = %job.video_id, "record gone before processing started");
            return Ok(());
        };
        if record.status.is_terminal() {
            tracing::warn!(video_id = %record.id, "record already terminal, skipping");
            return Ok(());
        }

        let media = match self
            .bounded("ingestion", self.ingest.acquire(&record.source))
            .await
        {
            Ok(media) => media,
            Err(e) => return self.fail(record, e.to_string()).await,
        };
        record.ingested(media.clone());
        if !self.persist(&record).await? {
            return Ok(());
        }

        record.advance(ProcessingStatus::Transcribing);
        if !self.persist(&record).await? {
            return Ok(());
        }
        let transcript = match self
            .bounded("transcribing", self.transcriber.transcribe(record.id, &media))
            .await
        {
            Ok(t) => t,
            Err(e) => return self.fail(record, e.to_string()).await,
        };
        self.artifacts.put_transcript(&transcript).await?;

        record.advance(ProcessingStatus::Analyzing);
        if !self.persist(&record).await? {
            return self.discard_artifacts(record.id).await;
        }
        let summary = match self
            .bounded("analyzing", self.analyzer.summarize(record.id, &transcript))
            .await
        {
            Ok(s) => s,
            Err(e) => return self.fail(record, e.to_string()).await,
        };
        self.artifacts.put_summary(&summary).await?;

        record.advance(ProcessingStatus::GeneratingClips);
        if !self.persist(&record).await? {
            return self.discard_artifacts(record.id).await;
        }
        let clips = match self
            .bounded(
                "generating_clips",
                self.clipper.generate_clips(record.id, &summary),
            )
            .await
        {
            Ok(c) => c,
            Err(e) => return self.fail(record, e.to_string()).await,
        };
        self.artifacts.put_clips(record.id, &clips).await?;

        let clip_ids: Vec<Uuid> = clips.iter().map(|c| c.clip_id).collect();
        record.complete(clip_ids);
        if !self.persist(&record).await? {
            return self.discard_artifacts(record.id).await;
        }

        tracing::info!(video_id = %record.id, clips = clips.len(), "video processed");
        Ok(())
    }

    /// Write the record back. False means it was deleted mid-run; the
    /// run aborts without resurrecting it.
    async fn persist(&self, record: &VideoRecord) -> Result<bool> {
        let alive = self.videos.update(record).await?;
        if !alive {
            tracing::debug!(video_id = %record.id, "record deleted mid-run, aborting");
        }
        Ok(alive)
    }

    /// Cascade-delete hit mid-run after artifacts were written; drop the
    /// orphans so lookups stay consistent with the record's absence.
    async fn discard_artifacts(&self, video_id: Uuid) -> Result<()> {
        self.artifacts.delete_for_video(video_id).await
    }

    async fn fail(&self, mut record: VideoRecord, reason: String) -> Result<()> {
        tracing::warn!(video_id = %record.id, status = ?record.status, reason = %reason, "pipeline failed");
        record.fail(reason);
        // A false return means the record was deleted; nothing to record.
        self.videos.update(&record).await?;
        Ok(())
    }

    async fn bounded<T>(
        &self,
        stage: &'static str,
        work: impl Future<Output = Result<T>> + Send,
    ) -> Result<T> {
        match self.stage_timeout {
            Some(limit) => match tokio::time::timeout(limit, work).await {
                Ok(result) => result,
                Err(_) => Err(Error::Stage {
                    stage,
                    reason: format!("timed out after {}s", limit.as_secs_f64()),
                }),
            },
            None => work.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryArtifactRepository, InMemoryJobQueue, InMemoryVideoRepository};
    use crate::adapters::simulated::{SimulatedAnalyzer, SimulatedClipper, SimulatedTranscriber};
    use crate::domain::video::{MediaHandle, ProcessingStatus, VideoSource};
    use crate::ports::ingest::MockMediaIngestPort;
    use crate::ports::stage::MockTranscriptionEngine;
    use std::path::PathBuf;

    struct Harness {
        videos: Arc<InMemoryVideoRepository>,
        artifacts: Arc<InMemoryArtifactRepository>,
        worker: WorkerService,
    }

    fn media_handle() -> MediaHandle {
        MediaHandle {
            file_path: PathBuf::from("storage/uploads/x.mp4"),
            title: Some("Lecture".into()),
            duration_secs: 30.0,
            thumbnail: None,
        }
    }

    fn harness_with(
        ingest: MockMediaIngestPort,
        transcriber: Arc<dyn TranscriptionEngine>,
        stage_timeout: Option<Duration>,
    ) -> Harness {
        let videos = Arc::new(InMemoryVideoRepository::new());
        let artifacts = Arc::new(InMemoryArtifactRepository::new());
        let queue = Arc::new(InMemoryJobQueue::new(8));
        let worker = WorkerService::new(
            videos.clone(),
            artifacts.clone(),
            queue,
            Arc::new(ingest),
            transcriber,
            Arc::new(SimulatedAnalyzer::new(Duration::ZERO)),
            Arc::new(SimulatedClipper::new(Duration::ZERO)),
            stage_timeout,
        );
        Harness {
            videos,
            artifacts,
            worker,
        }
    }

    fn harness(ingest: MockMediaIngestPort) -> Harness {
        harness_with(
            ingest,
            Arc::new(SimulatedTranscriber::new(Duration::ZERO)),
            None,
        )
    }

    fn upload_record(owner: Uuid) -> VideoRecord {
        VideoRecord::new(
            owner,
            "Lecture".into(),
            Some("intro".into()),
            VideoSource::Upload {
                file_path: PathBuf::from("storage/uploads/x.mp4"),
                filename: "x.mp4".into(),
            },
        )
    }

    fn remote_record(owner: Uuid) -> VideoRecord {
        VideoRecord::new(
            owner,
            "Talk".into(),
            None,
            VideoSource::RemoteUrl {
                url: "https://example.com/watch?v=xyz".into(),
            },
        )
    }

    #[tokio::test]
    async fn upload_pipeline_runs_to_completion() {
        let mut ingest = MockMediaIngestPort::new();
        ingest
            .expect_acquire()
            .returning(|_| Ok(media_handle()));
        let h = harness(ingest);

        let record = upload_record(Uuid::new_v4());
        h.videos.insert(&record).await.unwrap();

        h.worker
            .run(&ProcessVideoJob::for_video(record.id))
            .await
            .unwrap();

        let done = h.videos.get(record.id).await.unwrap().unwrap();
        assert_eq!(done.status, ProcessingStatus::Complete);
        assert_eq!(done.progress, 100);
        assert!(done.processed_at.is_some());
        assert_eq!(done.clip_ids.len(), 4);

        assert!(h.artifacts.get_transcript(record.id).await.unwrap().is_some());
        assert!(h.artifacts.get_summary(record.id).await.unwrap().is_some());
        let clips = h.artifacts.get_clips(record.id).await.unwrap();
        assert_eq!(clips.len(), 4);
        let stored_ids: Vec<Uuid> = clips.iter().map(|c| c.clip_id).collect();
        assert_eq!(stored_ids, done.clip_ids);
    }

    #[tokio::test]
    async fn failed_ingestion_fails_the_job_with_no_artifacts() {
        let mut ingest = MockMediaIngestPort::new();
        ingest
            .expect_acquire()
            .returning(|_| Err(Error::Ingestion("Video unavailable".into())));
        let h = harness(ingest);

        let record = remote_record(Uuid::new_v4());
        h.videos.insert(&record).await.unwrap();

        h.worker
            .run(&ProcessVideoJob::for_video(record.id))
            .await
            .unwrap();

        let failed = h.videos.get(record.id).await.unwrap().unwrap();
        assert_eq!(failed.status, ProcessingStatus::Failed);
        assert!(failed.error.as_deref().unwrap().contains("Video unavailable"));
        assert_eq!(failed.progress, 0);

        assert!(h.artifacts.get_transcript(record.id).await.unwrap().is_none());
        assert!(h.artifacts.get_summary(record.id).await.unwrap().is_none());
        assert!(h.artifacts.get_clips(record.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stage_failure_freezes_progress_at_its_checkpoint() {
        let mut ingest = MockMediaIngestPort::new();
        ingest.expect_acquire().returning(|_| Ok(media_handle()));
        let mut transcriber = MockTranscriptionEngine::new();
        transcriber.expect_transcribe().returning(|_, _| {
            Err(Error::Stage {
                stage: "transcribing",
                reason: "engine crashed".into(),
            })
        });
        let h = harness_with(ingest, Arc::new(transcriber), None);

        let record = upload_record(Uuid::new_v4());
        h.videos.insert(&record).await.unwrap();

        h.worker
            .run(&ProcessVideoJob::for_video(record.id))
            .await
            .unwrap();

        let failed = h.videos.get(record.id).await.unwrap().unwrap();
        assert_eq!(failed.status, ProcessingStatus::Failed);
        assert_eq!(failed.progress, 20);
        assert!(failed.error.as_deref().unwrap().contains("engine crashed"));
        assert!(h.artifacts.get_transcript(record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn configured_timeout_fails_a_stuck_stage() {
        let mut ingest = MockMediaIngestPort::new();
        ingest.expect_acquire().returning(|_| Ok(media_handle()));
        let h = harness_with(
            ingest,
            Arc::new(SimulatedTranscriber::new(Duration::from_secs(5))),
            Some(Duration::from_millis(20)),
        );

        let record = upload_record(Uuid::new_v4());
        h.videos.insert(&record).await.unwrap();

        h.worker
            .run(&ProcessVideoJob::for_video(record.id))
            .await
            .unwrap();

        let failed = h.videos.get(record.id).await.unwrap().unwrap();
        assert_eq!(failed.status, ProcessingStatus::Failed);
        assert!(failed.error.as_deref().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn deleted_record_is_skipped_silently() {
        let ingest = MockMediaIngestPort::new(); // acquire must never be called
        let h = harness(ingest);

        h.worker
            .run(&ProcessVideoJob::for_video(Uuid::new_v4()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn remote_pipeline_reports_download_progress() {
        let mut ingest = MockMediaIngestPort::new();
        ingest.expect_acquire().returning(|_| Ok(media_handle()));
        let h = harness(ingest);

        let record = remote_record(Uuid::new_v4());
        h.videos.insert(&record).await.unwrap();
        assert_eq!(record.status, ProcessingStatus::Downloading);

        h.worker
            .run(&ProcessVideoJob::for_video(record.id))
            .await
            .unwrap();

        let done = h.videos.get(record.id).await.unwrap().unwrap();
        assert_eq!(done.status, ProcessingStatus::Complete);
        assert_eq!(done.progress, 100);
        assert!(done.media.is_some());
    }
}
