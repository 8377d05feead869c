//! Ingestion for directly uploaded files. The HTTP layer has already
//! streamed the bytes to disk; acquisition validates the stored file and
//! wraps it in a media handle.

use crate::domain::video::MediaHandle;
use crate::error::{Error, Result};
use std::path::Path;

pub struct StoredUploadIngestor;

impl StoredUploadIngestor {
    pub async fn acquire(&self, file_path: &Path, filename: &str) -> Result<MediaHandle> {
        let meta = tokio::fs::metadata(file_path).await.map_err(|e| {
            Error::Ingestion(format!("stored upload {} is unreadable: {}", filename, e))
        })?;
        if meta.len() == 0 {
            return Err(Error::Ingestion(format!("stored upload {} is empty", filename)));
        }
        Ok(MediaHandle {
            file_path: file_path.to_path_buf(),
            title: None,
            duration_secs: 0.0,
            thumbnail: None,
        })
    }
}
