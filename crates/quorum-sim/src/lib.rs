#![forbid(unsafe_code)]
//! quorum-sim library.
//!
//! Seeded inputs for exercising the diagnostics without real data: numeric
//! samples with known leading-digit behaviour and a small relationship
//! dataset with a known authority ordering.
//!
//! # Conventions
//!
//! - **Errors**: Return typed errors (`SampleError`, `AnalysisError`).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//! - **Determinism**: The same seed always produces the same sample.

pub mod dataset;
pub mod samples;

pub use dataset::{demo_records, demo_relationships};
pub use samples::{SampleError, SampleKind, engineered_sample, generate, organic_sample};
