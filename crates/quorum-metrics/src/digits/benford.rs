//! Benford reference distribution and deviation scoring.
//!
//! # Overview
//!
//! Many naturally occurring magnitudes (vote counts, invoice totals,
//! populations) follow Benford's law: the leading digit is 1 about 30% of the
//! time and 9 under 5% of the time. Numbers produced by a person or a uniform
//! generator tend to spread evenly over the leading digits instead.
//!
//! The deviation score is the mean absolute difference, in percentage
//! points, between an observed [`LeadingDigitHistogram`] and the fixed
//! reference table:
//!
//! ```text
//! score = (1/9) * Σ_{d=1..9} |observed[d] - reference[d]|
//! ```

use serde::Serialize;

use crate::digits::leading::LeadingDigitHistogram;

/// Theoretical Benford percentages for leading digits 1–9, rounded to one
/// decimal. Index `d - 1` holds digit `d`.
pub const BENFORD_REFERENCE: [f64; 9] = [30.1, 17.6, 12.5, 9.7, 7.9, 6.7, 5.8, 5.1, 4.6];

/// Default anomaly threshold in percentage points.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 2.0;

/// The reference table as a histogram, for callers that want to chart it
/// next to an observed distribution.
#[must_use]
pub fn reference_histogram() -> LeadingDigitHistogram {
    LeadingDigitHistogram::from_dense(BENFORD_REFERENCE)
}

// ---------------------------------------------------------------------------
// DeviationScore
// ---------------------------------------------------------------------------

/// Mean absolute deviation from the Benford reference, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct DeviationScore(f64);

impl DeviationScore {
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Return `true` when the score is strictly above `threshold`.
    #[must_use]
    pub fn is_anomalous(self, threshold: f64) -> bool {
        self.0 > threshold
    }
}

impl std::fmt::Display for DeviationScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Per-digit observed vs expected values, the raw material for a
/// comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DigitComparison {
    pub digit: u8,
    pub observed: f64,
    pub expected: f64,
    /// `observed - expected`, signed.
    pub difference: f64,
}

/// Compare `histogram` against the reference digit by digit.
#[must_use]
pub fn compare(histogram: &LeadingDigitHistogram) -> Vec<DigitComparison> {
    histogram
        .iter()
        .zip(BENFORD_REFERENCE)
        .map(|((digit, observed), expected)| DigitComparison {
            digit,
            observed,
            expected,
            difference: observed - expected,
        })
        .collect()
}

/// Reduce `histogram` to its mean absolute deviation from the reference.
#[must_use]
pub fn deviation(histogram: &LeadingDigitHistogram) -> DeviationScore {
    let total: f64 = compare(histogram)
        .iter()
        .map(|row| row.difference.abs())
        .sum();
    DeviationScore(total / 9.0)
}
