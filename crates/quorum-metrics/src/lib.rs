#![forbid(unsafe_code)]
//! quorum-metrics library.
//!
//! Two independent diagnostics, each a pure function of its input:
//!
//! - [`rank_authority`]: builds a [`DirectedGraph`] from relationships and
//!   ranks entities by PageRank over the reversed edges.
//! - [`score_benford_deviation`]: builds a leading-digit histogram from a
//!   numeric sample and scores its deviation from Benford's law.
//!
//! Nothing here touches the filesystem or the console.
//!
//! # Conventions
//!
//! - **Errors**: Return `Result<_, AnalysisError>`; never panic on input.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod digits;
pub mod graph;
pub mod metrics;

use quorum_core::{AnalysisError, Relationship};
use tracing::instrument;

pub use digits::{DeviationScore, LeadingDigitHistogram};
pub use graph::{DirectedGraph, GraphStats};
pub use metrics::{AuthorityScore, RankConfig, RankedEntity};

/// Rank entities by reversed-edge authority with the default parameters
/// (damping 0.85, tolerance 1e-6, 100 iterations).
///
/// # Errors
///
/// Never fails for the default parameters; the `Result` mirrors
/// [`rank_authority_with`].
pub fn rank_authority(relationships: &[Relationship]) -> Result<AuthorityScore, AnalysisError> {
    rank_authority_with(relationships, &RankConfig::default())
}

/// Rank entities by reversed-edge authority.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidConfig`] if `config` is out of range.
#[instrument(skip(relationships, config), fields(relationships = relationships.len()))]
pub fn rank_authority_with(
    relationships: &[Relationship],
    config: &RankConfig,
) -> Result<AuthorityScore, AnalysisError> {
    let graph = DirectedGraph::from_relationships(relationships);
    metrics::authority::rank(&graph, config)
}

/// Compute the leading-digit histogram of `sample` and its deviation from
/// the Benford reference.
///
/// # Errors
///
/// - [`AnalysisError::ValueRange`] for the first non-positive value.
/// - [`AnalysisError::EmptySample`] for an empty sample.
#[instrument(skip(sample), fields(len = sample.len()))]
pub fn score_benford_deviation(
    sample: &[i64],
) -> Result<(LeadingDigitHistogram, DeviationScore), AnalysisError> {
    let histogram = LeadingDigitHistogram::from_sample(sample)?;
    let score = digits::deviation(&histogram);
    tracing::debug!(score = score.value(), "benford deviation computed");
    Ok((histogram, score))
}
