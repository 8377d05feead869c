//! Lyceum server binary. Wires up:
//! - In-memory repositories and the bounded job queue
//! - Ingestion (stored uploads + yt-dlp) and simulated stage engines
//! - The pipeline worker pool
//! - The REST API

use lyceum::adapters::http::{self, auth::AuthService, AppState};
use lyceum::adapters::ingest::SourceIngestor;
use lyceum::adapters::memory::{
    InMemoryArtifactRepository, InMemoryJobQueue, InMemoryUserRepository, InMemoryVideoRepository,
};
use lyceum::adapters::simulated::{SimulatedAnalyzer, SimulatedClipper, SimulatedTranscriber};
use lyceum::application::{CatalogService, IntakeService, WorkerService};
use lyceum::config::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt::init();

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .expect("Failed to create upload directory");

    // 1. Adapters
    let videos = Arc::new(InMemoryVideoRepository::new());
    let artifacts = Arc::new(InMemoryArtifactRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let queue = Arc::new(InMemoryJobQueue::new(config.queue_capacity));
    let ingest = Arc::new(SourceIngestor::new(config.upload_dir.clone()));

    let stage_delay = Duration::from_millis(config.stage_delay_ms);
    let transcriber = Arc::new(SimulatedTranscriber::new(stage_delay));
    let analyzer = Arc::new(SimulatedAnalyzer::new(stage_delay));
    let clipper = Arc::new(SimulatedClipper::new(stage_delay));

    // 2. Application services
    let intake = Arc::new(IntakeService::new(videos.clone(), queue.clone()));
    let catalog = Arc::new(CatalogService::new(videos.clone(), artifacts.clone()));
    let auth = AuthService::new(
        users.clone(),
        config.secret_key.clone(),
        config.token_expiry_mins,
    );

    let worker_service = Arc::new(WorkerService::new(
        videos,
        artifacts,
        queue,
        ingest,
        transcriber,
        analyzer,
        clipper,
        config.stage_timeout,
    ));

    // 3. Start workers
    for i in 0..config.worker_count {
        let w = worker_service.clone();
        tokio::spawn(async move {
            w.run_worker_loop(i).await;
        });
    }
    tracing::info!("Started {} pipeline workers", config.worker_count);

    // 4. HTTP layer
    let state = AppState {
        intake,
        catalog,
        auth,
        upload_dir: PathBuf::from(&config.upload_dir),
    };
    let app = http::router(state);

    // 5. Start server
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.addr, config.port))
        .await
        .expect("Failed to bind TCP listener");
    tracing::info!("Listening at {}:{}", config.addr, config.port);
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
