//! Video submission and catalog handlers.

use super::auth::CurrentUser;
use super::AppState;
use crate::application::catalog::{ClipsView, DashboardView, StatusView, VideoOverview};
use crate::domain::artifact::{Summary, Transcript};
use crate::domain::video::{ProcessingStatus, VideoRecord};
use crate::error::{Error, Result};
use axum::body::Bytes;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, Path, State};
use axum::{BoxError, Json};
use futures::{Stream, TryStreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io;
use std::path::{Component, PathBuf};
use tokio::fs::File;
use tokio::io::BufWriter;
use tokio_util::io::StreamReader;
use uuid::Uuid;

const ALLOWED_VIDEO_TYPES: &[&str] = &[
    "video/mp4",
    "video/avi",
    "video/mov",
    "video/mkv",
    "video/webm",
];

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub video_id: Uuid,
    pub message: String,
    pub status: ProcessingStatus,
}

impl SubmitResponse {
    fn for_record(record: &VideoRecord, message: &str) -> Self {
        Self {
            success: true,
            video_id: record.id,
            message: message.to_string(),
            status: record.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
}

// Handler that accepts a multipart form upload (file + title +
// description) and streams the file field to the upload directory.
pub async fn upload(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<SubmitResponse>> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut stored: Option<(PathBuf, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidRequest(format!("malformed multipart body: {}", e)))?
    {
        match field.name() {
            Some("title") => {
                title = Some(read_text_field(field).await?);
            }
            Some("description") => {
                description = Some(read_text_field(field).await?);
            }
            Some("file") => {
                stored = Some(store_upload_field(&state.upload_dir, field).await?);
            }
            _ => continue,
        }
    }

    let (file_path, filename) =
        stored.ok_or_else(|| Error::InvalidRequest("missing file field".into()))?;
    let Some(title) = title else {
        // The file was already streamed to disk; don't orphan it on a
        // malformed submission.
        let _ = tokio::fs::remove_file(&file_path).await;
        return Err(Error::InvalidRequest("missing title field".into()));
    };

    let record = match state
        .intake
        .submit_upload(user.id, title, description, file_path.clone(), filename)
        .await
    {
        Ok(record) => record,
        Err(e) => {
            let _ = tokio::fs::remove_file(&file_path).await;
            return Err(e);
        }
    };

    Ok(Json(SubmitResponse::for_record(
        &record,
        "Video uploaded successfully. Processing started.",
    )))
}

pub async fn link(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<LinkRequest>,
) -> Result<Json<SubmitResponse>> {
    let record = state
        .intake
        .submit_remote(user.id, request.title, request.description, &request.url)
        .await?;

    Ok(Json(SubmitResponse::for_record(
        &record,
        "Video download started. Processing will begin automatically.",
    )))
}

pub async fn status(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(video_id): Path<Uuid>,
) -> Result<Json<StatusView>> {
    Ok(Json(state.catalog.status(user.id, video_id).await?))
}

pub async fn transcript(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(video_id): Path<Uuid>,
) -> Result<Json<Transcript>> {
    Ok(Json(state.catalog.transcript(user.id, video_id).await?))
}

pub async fn summary(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(video_id): Path<Uuid>,
) -> Result<Json<Summary>> {
    Ok(Json(state.catalog.summary(user.id, video_id).await?))
}

pub async fn clips(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(video_id): Path<Uuid>,
) -> Result<Json<ClipsView>> {
    Ok(Json(state.catalog.clips(user.id, video_id).await?))
}

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>> {
    let videos: Vec<VideoOverview> = state.catalog.list(user.id).await?;
    Ok(Json(json!({ "videos": videos, "total": videos.len() })))
}

pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<DashboardView>> {
    Ok(Json(state.catalog.dashboard(user.id).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(video_id): Path<Uuid>,
) -> Result<Json<Value>> {
    state.catalog.delete(user.id, video_id).await?;
    Ok(Json(json!({ "success": true, "message": "Video deleted successfully" })))
}

async fn read_text_field(field: Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| Error::InvalidRequest(format!("unreadable form field: {}", e)))
}

/// Validate the field's content type and filename, then stream it to the
/// upload directory under a fresh unique name.
async fn store_upload_field(
    upload_dir: &std::path::Path,
    field: Field<'_>,
) -> Result<(PathBuf, String)> {
    let filename = field
        .file_name()
        .ok_or_else(|| Error::InvalidRequest("file field has no filename".into()))?
        .to_owned();
    if !filename_is_safe(&filename) {
        return Err(Error::InvalidRequest(format!(
            "invalid filename: {}",
            filename
        )));
    }

    let content_type = field.content_type().unwrap_or_default().to_owned();
    if !ALLOWED_VIDEO_TYPES.contains(&content_type.as_str()) {
        return Err(Error::InvalidRequest(
            "Invalid file type. Supported: MP4, AVI, MOV, MKV, WEBM".into(),
        ));
    }

    let path = upload_dir.join(format!("{}_{}", Uuid::new_v4(), filename));
    stream_to_file(&path, field).await?;
    Ok((path, filename))
}

// Save a `Stream` to a file
async fn stream_to_file<S, E>(path: &PathBuf, stream: S) -> Result<()>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: Into<BoxError>,
{
    let body_with_io_error = stream.map_err(|err| io::Error::new(io::ErrorKind::Other, err));
    let body_reader = StreamReader::new(body_with_io_error);
    futures::pin_mut!(body_reader);

    let mut file = BufWriter::new(File::create(path).await?);
    tokio::io::copy(&mut body_reader, &mut file).await?;

    Ok(())
}

/// An uploaded filename must be a single path component; anything with
/// separators or parent references is rejected.
fn filename_is_safe(filename: &str) -> bool {
    let path = std::path::Path::new(filename);
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
