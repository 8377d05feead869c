//! Lyceum - Video Learning Platform Backend
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (video record state machine, artifacts, users, jobs)
//! - ports/: Trait definitions (repositories, queue, ingestion, stage engines)
//! - adapters/: Concrete implementations (in-memory stores, yt-dlp, simulated AI, HTTP)
//! - application/: Services over the ports (intake, pipeline worker, catalog)
//! - config: Environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

pub use config::AppConfig;
pub use error::{Error, Result};
