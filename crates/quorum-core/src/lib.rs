#![forbid(unsafe_code)]
//! quorum-core library.
//!
//! Shared vocabulary for the quorum analysis crates: relationship records,
//! typed analysis errors, and the analysis configuration.
//!
//! # Conventions
//!
//! - **Errors**: Library functions return `Result<_, AnalysisError>`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//! - **I/O**: None. Callers read files and hand in parsed values.

pub mod config;
pub mod error;
pub mod model;

pub use config::{AnalysisConfig, AuthorityConfig, BenfordConfig, SampleConfig};
pub use error::{AnalysisError, ErrorCode, RecordField};
pub use model::{EntityId, Relationship, RelationshipRecord, validate_records};
