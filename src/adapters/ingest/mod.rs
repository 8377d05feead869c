//! Media ingestion adapters.

pub mod remote;
pub mod upload;

use crate::domain::video::{MediaHandle, VideoSource};
use crate::error::Result;
use crate::ports::ingest::MediaIngestPort;
use async_trait::async_trait;
use remote::YtDlpFetcher;
use std::path::PathBuf;
use upload::StoredUploadIngestor;

/// Dispatches acquisition to the adapter matching the video source.
pub struct SourceIngestor {
    uploads: StoredUploadIngestor,
    remote: YtDlpFetcher,
}

impl SourceIngestor {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads: StoredUploadIngestor,
            remote: YtDlpFetcher::new(download_dir),
        }
    }
}

#[async_trait]
impl MediaIngestPort for SourceIngestor {
    async fn acquire(&self, source: &VideoSource) -> Result<MediaHandle> {
        match source {
            VideoSource::Upload {
                file_path,
                filename,
            } => self.uploads.acquire(file_path, filename).await,
            VideoSource::RemoteUrl { url } => self.remote.fetch(url).await,
        }
    }
}
