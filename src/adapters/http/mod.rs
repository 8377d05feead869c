//! Inbound REST adapter.

pub mod auth;
pub mod videos;

use crate::application::{CatalogService, IntakeService};
use auth::AuthService;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::error::Result;

#[derive(Clone)]
pub struct AppState {
    pub intake: Arc<IntakeService>,
    pub catalog: Arc<CatalogService>,
    pub auth: AuthService,
    pub upload_dir: PathBuf,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/videos/upload", post(videos::upload))
        .route("/api/videos/link", post(videos::link))
        .route("/api/videos", get(videos::list))
        .route("/api/videos/:id/status", get(videos::status))
        .route("/api/videos/:id/transcript", get(videos::transcript))
        .route("/api/videos/:id/summary", get(videos::summary))
        .route("/api/videos/:id/clips", get(videos::clips))
        .route("/api/videos/:id", delete(videos::remove))
        .route("/api/analytics/dashboard", get(videos::dashboard))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Lyceum API v2.0",
        "status": "online",
        "features": ["Remote URL", "Direct Upload", "AI Processing"],
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<auth::RegisterRequest>,
) -> Result<Json<auth::TokenResponse>> {
    Ok(Json(state.auth.register(request).await?))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<auth::LoginRequest>,
) -> Result<Json<auth::TokenResponse>> {
    Ok(Json(state.auth.login(request).await?))
}
