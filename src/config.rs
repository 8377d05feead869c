//! Environment configuration.

use std::env;
use std::time::Duration;

/// Configuration for the single-process deployment.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// Directory for uploaded and fetched media files
    pub upload_dir: String,
    /// Secret for signing access tokens
    pub secret_key: String,
    /// Access token lifetime in minutes
    pub token_expiry_mins: i64,
    /// Number of pipeline worker tasks
    pub worker_count: usize,
    /// Bounded job queue capacity
    pub queue_capacity: usize,
    /// Simulated per-stage work delay in milliseconds
    pub stage_delay_ms: u64,
    /// Optional per-stage timeout; unset means stages may run indefinitely
    pub stage_timeout: Option<Duration>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            addr: env::var("ADDR").unwrap_or_else(|_| String::from("127.0.0.1")),
            port: env::var("PORT").unwrap_or_else(|_| String::from("8000")),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| String::from("storage/uploads")),
            secret_key: env::var("SECRET_KEY")
                .unwrap_or_else(|_| String::from("change-me-in-production")),
            token_expiry_mins: env::var("TOKEN_EXPIRY_MINS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1440),
            worker_count: env::var("WORKER_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
            queue_capacity: env::var("QUEUE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64),
            stage_delay_ms: env::var("STAGE_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2000),
            stage_timeout: env::var("STAGE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
        }
    }
}
