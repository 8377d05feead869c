//! Adapters layer - concrete implementations of the ports.

pub mod http;
pub mod ingest;
pub mod memory;
pub mod simulated;
