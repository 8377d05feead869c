//! Simulated stage engines. Each sleeps for a configurable delay in
//! place of real inference, then emits fixed reference artifacts.

pub mod analyzer;
pub mod clipper;
pub mod transcriber;

pub use analyzer::SimulatedAnalyzer;
pub use clipper::SimulatedClipper;
pub use transcriber::SimulatedTranscriber;
