//! Crate-wide error taxonomy and HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not the owner of this resource")]
    Forbidden,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Media acquisition failed. Recorded on the video record by the
    /// pipeline runner, never returned to the submission caller.
    #[error("ingestion failed: {0}")]
    Ingestion(String),

    /// A pipeline stage could not produce its artifact.
    #[error("{stage} stage failed: {reason}")]
    Stage {
        stage: &'static str,
        reason: String,
    },

    /// Job queue is full or closed; surfaces synchronously at submission.
    #[error("queue unavailable: {0}")]
    Queue(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Queue(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Ingestion(_) | Error::Stage { .. } | Error::Io(_) | Error::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_facing_variants_map_to_client_codes() {
        assert_eq!(Error::NotFound("video").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::Unauthorized("bad token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(Error::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            Error::Conflict("email taken".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            Error::InvalidRequest("bad url".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Queue("full".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn pipeline_variants_are_server_errors() {
        assert_eq!(
            Error::Ingestion("yt-dlp exited 1".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::Stage {
                stage: "transcribing",
                reason: "engine crashed".into()
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
