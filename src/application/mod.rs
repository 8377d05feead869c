//! Application layer - services over the ports.

pub mod catalog;
pub mod intake;
pub mod worker;

pub use catalog::CatalogService;
pub use intake::IntakeService;
pub use worker::WorkerService;
