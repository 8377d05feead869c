//! Domain layer - pure business types, no I/O.

pub mod artifact;
pub mod job;
pub mod user;
pub mod video;
