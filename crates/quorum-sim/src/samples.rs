//! Seeded numeric sample generators.
//!
//! Two shapes of synthetic magnitude data:
//!
//! - **Organic**: log-normal draws (μ = 8, σ = 1.5 in natural-log space),
//!   truncated to integers. Spanning several decades, their leading digits
//!   follow Benford's law closely.
//! - **Engineered**: uniform integers in `[1000, 25000)`, the kind of range a
//!   person picks when fabricating totals. Leading digits 1 and 2 are
//!   over-represented and 3–9 flattened, far from Benford.
//!
//! Both are fully determined by [`SampleConfig::seed`].

use quorum_core::SampleConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, LogNormal};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Location of the organic log-normal in natural-log space.
pub const ORGANIC_MU: f64 = 8.0;
/// Scale of the organic log-normal in natural-log space.
pub const ORGANIC_SIGMA: f64 = 1.5;
/// Inclusive lower bound of engineered values.
pub const ENGINEERED_LOW: i64 = 1000;
/// Exclusive upper bound of engineered values.
pub const ENGINEERED_HIGH: i64 = 25_000;

/// Which generator to draw a sample from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleKind {
    Organic,
    Engineered,
}

impl SampleKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organic => "organic",
            Self::Engineered => "engineered",
        }
    }
}

/// Errors from configuring a generator.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("invalid log-normal parameters: {0}")]
    LogNormal(#[from] rand_distr::NormalError),
}

/// Draw a sample of the requested kind.
///
/// # Errors
///
/// Returns [`SampleError`] if the organic distribution cannot be built.
pub fn generate(kind: SampleKind, config: SampleConfig) -> Result<Vec<i64>, SampleError> {
    match kind {
        SampleKind::Organic => organic_sample(config),
        SampleKind::Engineered => Ok(engineered_sample(config)),
    }
}

/// Draw `config.size` log-normal values and keep the positive integer parts.
///
/// Draws below 1.0 truncate to zero and are dropped, so the result can be
/// shorter than `config.size`.
///
/// # Errors
///
/// Returns [`SampleError::LogNormal`] if the distribution parameters are
/// rejected.
pub fn organic_sample(config: SampleConfig) -> Result<Vec<i64>, SampleError> {
    let distribution = LogNormal::new(ORGANIC_MU, ORGANIC_SIGMA)?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let sample: Vec<i64> = (0..config.size)
        .map(|_| truncate(distribution.sample(&mut rng)))
        .filter(|&value| value > 0)
        .collect();

    debug!(
        seed = config.seed,
        requested = config.size,
        kept = sample.len(),
        "generated organic sample"
    );
    Ok(sample)
}

/// Draw `config.size` uniform integers in `[ENGINEERED_LOW, ENGINEERED_HIGH)`.
#[must_use]
pub fn engineered_sample(config: SampleConfig) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let sample: Vec<i64> = (0..config.size)
        .map(|_| rng.gen_range(ENGINEERED_LOW..ENGINEERED_HIGH))
        .collect();
    debug!(seed = config.seed, size = sample.len(), "generated engineered sample");
    sample
}

/// Integer part of a draw, saturating at `i64::MAX`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate(draw: f64) -> i64 {
    if draw >= i64::MAX as f64 {
        i64::MAX
    } else {
        draw.trunc() as i64
    }
}
