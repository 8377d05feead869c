//! In-memory adapters: repositories and job queue.

pub mod queue;
pub mod repository;

pub use queue::InMemoryJobQueue;
pub use repository::{InMemoryArtifactRepository, InMemoryUserRepository, InMemoryVideoRepository};
