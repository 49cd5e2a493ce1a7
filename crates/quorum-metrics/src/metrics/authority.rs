//! Authority ranking: PageRank over the reversed relationship graph.
//!
//! # Overview
//!
//! Plain PageRank rewards nodes that many others point *to*. In a
//! relationship graph where `A → B` means "A controls B", that favors the
//! controlled leaves. Reversing every edge first makes the score flow from
//! the leaves back up to whoever controls them, so high authority marks the
//! root controllers.
//!
//! # Algorithm
//!
//! Power iteration on the reversed graph:
//!
//! ```text
//! floor  = (1 - d) / N + d * Σ PR(dangling) / N
//! PR'(v) = floor + d * Σ PR(u) / out_degree(u)   for each reversed u → v
//! ```
//!
//! where `d` is the damping factor (default 0.85) and "dangling" nodes have
//! no reversed out-edges. Iteration stops once the L1 norm of the change
//! drops below the tolerance (default 1e-6) or after `max_iterations`
//! (default 100).
//!
//! A node with no reversed in-edges receives exactly `floor` in every
//! iteration. Scores always sum to 1.
//!
//! # Output
//!
//! An [`AuthorityScore`] with per-entity scores and run metadata. Running out
//! of iterations is not an error: the last iterate is returned with
//! `converged = false` so the caller can flag low confidence.

use std::collections::BTreeMap;

use quorum_core::{AnalysisError, AuthorityConfig, EntityId};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::graph::build::DirectedGraph;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the authority power iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    /// Default: 0.85.
    pub damping: f64,
    /// Convergence threshold: stop when L1 norm of rank delta < tolerance.
    /// Default: 1e-6.
    pub tolerance: f64,
    /// Maximum number of iterations.
    /// Default: 100.
    pub max_iterations: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

impl From<&AuthorityConfig> for RankConfig {
    fn from(config: &AuthorityConfig) -> Self {
        Self {
            damping: config.damping,
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
        }
    }
}

impl RankConfig {
    /// Check every parameter is inside its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfig`] when damping is outside
    /// `[0, 1)`, the tolerance is not a positive finite number, or
    /// `max_iterations` is zero.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(0.0..1.0).contains(&self.damping) {
            return Err(AnalysisError::InvalidConfig {
                field: "damping",
                reason: format!("{} is outside [0, 1)", self.damping),
            });
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(AnalysisError::InvalidConfig {
                field: "tolerance",
                reason: format!("{} is not a positive finite number", self.tolerance),
            });
        }
        if self.max_iterations == 0 {
            return Err(AnalysisError::InvalidConfig {
                field: "max_iterations",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Normalized authority distribution over the graph's entities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorityScore {
    /// Entity ID → score. Scores are non-negative and sum to 1.
    pub scores: BTreeMap<EntityId, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the iteration converged within `max_iterations`.
    pub converged: bool,
    /// Uniform mass every node received in the final iteration.
    pub floor: f64,
}

/// One row of a ranked authority listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntity {
    pub id: EntityId,
    pub score: f64,
}

impl AuthorityScore {
    const fn empty() -> Self {
        Self {
            scores: BTreeMap::new(),
            iterations: 0,
            converged: true,
            floor: 0.0,
        }
    }

    /// Score for one entity, if it is in the graph.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<f64> {
        self.scores.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Sum of all scores (1.0 up to rounding for a non-empty graph).
    #[must_use]
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    /// All entities ordered by descending score, ties broken by ID.
    #[must_use]
    pub fn ranked(&self) -> Vec<RankedEntity> {
        let mut ranked: Vec<RankedEntity> = self
            .scores
            .iter()
            .map(|(id, &score)| RankedEntity {
                id: id.clone(),
                score,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        ranked
    }

    /// Entities scoring strictly above `threshold`, ranked.
    #[must_use]
    pub fn leaders(&self, threshold: f64) -> Vec<RankedEntity> {
        self.ranked()
            .into_iter()
            .filter(|entry| entry.score > threshold)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Authority ranking
// ---------------------------------------------------------------------------

/// Rank every entity of `graph` by authority.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidConfig`] if `config` fails
/// [`RankConfig::validate`]. Non-convergence is reported through
/// [`AuthorityScore::converged`], never as an error.
#[instrument(skip(graph, config), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
#[allow(clippy::cast_precision_loss)] // node counts won't exceed f64 precision
pub fn rank(graph: &DirectedGraph, config: &RankConfig) -> Result<AuthorityScore, AnalysisError> {
    config.validate()?;

    let n = graph.node_count();
    if n == 0 {
        return Ok(AuthorityScore::empty());
    }

    let reversed = graph.reversed();
    let n_f64 = n as f64;
    let d = config.damping;
    let teleport = (1.0 - d) / n_f64;

    // Initialize ranks uniformly.
    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;
    let mut floor = 1.0 / n_f64;

    for _ in 0..config.max_iterations {
        iterations += 1;

        // Dangling mass is spread uniformly so the total stays at 1.
        let dangling_sum: f64 = reversed
            .iter()
            .zip(ranks.iter())
            .filter(|(targets, _)| targets.is_empty())
            .map(|(_, rank)| rank)
            .sum();
        floor = teleport + d * dangling_sum / n_f64;

        new_ranks.fill(floor);

        for (u, targets) in reversed.iter().enumerate() {
            if targets.is_empty() {
                continue;
            }
            let share = d * ranks[u] / targets.len() as f64;
            for &v in targets {
                new_ranks[v] += share;
            }
        }

        // Check convergence: L1 norm of delta.
        let delta: f64 = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        debug!(iterations, "authority ranking converged");
    } else {
        warn!(
            iterations,
            tolerance = config.tolerance,
            "authority ranking hit the iteration cap; returning best estimate"
        );
    }

    let scores = graph.nodes().iter().cloned().zip(ranks).collect();

    Ok(AuthorityScore {
        scores,
        iterations,
        converged,
        floor,
    })
}
