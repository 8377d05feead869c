//! Ports layer - trait definitions implemented by adapters.

pub mod ingest;
pub mod queue;
pub mod repository;
pub mod stage;
