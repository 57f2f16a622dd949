//! Emotion self-assessment toolkit: instrument catalog, response capture,
//! scoring, insight generation and report export.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
