//! Leading-digit extraction and frequency histograms.
//!
//! The leading digit of a positive integer is the digit in its highest
//! decimal place: `leading_digit(4071) == Some(4)`. Zero and negative values
//! have no leading significant digit in this model and are rejected.

use quorum_core::AnalysisError;
use serde::Serialize;
use tracing::instrument;

/// The digits a leading significant digit can take.
pub const DIGITS: std::ops::RangeInclusive<u8> = 1..=9;

/// Return the first significant decimal digit of `value`, or `None` when
/// `value` is not positive.
#[must_use]
pub fn leading_digit(value: i64) -> Option<u8> {
    if value <= 0 {
        return None;
    }
    let mut v = value;
    while v >= 10 {
        v /= 10;
    }
    u8::try_from(v).ok()
}

/// Drop every non-positive value, keeping order.
///
/// Use this before [`LeadingDigitHistogram::from_sample`] when zeros or
/// negatives are expected noise rather than an input error.
#[must_use]
pub fn positive_only(sample: &[i64]) -> Vec<i64> {
    sample.iter().copied().filter(|&v| v > 0).collect()
}

// ---------------------------------------------------------------------------
// LeadingDigitHistogram
// ---------------------------------------------------------------------------

/// Dense percentage distribution over leading digits 1–9.
///
/// Index `d - 1` holds the value for digit `d`. Digits that never occur are
/// present with 0.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadingDigitHistogram {
    /// Percentage of samples per digit; sums to 100 for a non-empty sample.
    percentages: [f64; 9],
    /// Raw occurrence count per digit. All zero for histograms built from
    /// external percentages.
    counts: [u64; 9],
    /// Number of values the histogram was computed from.
    total: u64,
}

impl LeadingDigitHistogram {
    /// Count the leading digits of `sample` and convert them to percentages.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::ValueRange`] for the first non-positive value.
    /// - [`AnalysisError::EmptySample`] when `sample` is empty.
    #[instrument(skip(sample), fields(len = sample.len()))]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_sample(sample: &[i64]) -> Result<Self, AnalysisError> {
        if sample.is_empty() {
            return Err(AnalysisError::EmptySample);
        }

        let mut counts = [0_u64; 9];
        for (index, &value) in sample.iter().enumerate() {
            let digit = leading_digit(value).ok_or(AnalysisError::ValueRange { index, value })?;
            counts[usize::from(digit - 1)] += 1;
        }

        let total = sample.len() as u64;
        let total_f64 = total as f64;
        let percentages = counts.map(|count| count as f64 / total_f64 * 100.0);

        Ok(Self {
            percentages,
            counts,
            total,
        })
    }

    /// Build a dense histogram from a possibly sparse `(digit, percentage)`
    /// listing. Missing digits are filled with 0.0; a digit listed twice
    /// keeps its last value.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ValueRange`] for a digit outside 1–9, with
    /// `index` set to its position in the listing, and
    /// [`AnalysisError::InvalidPercentage`] for a NaN, infinite or negative
    /// percentage.
    pub fn from_percentages(
        entries: impl IntoIterator<Item = (u8, f64)>,
    ) -> Result<Self, AnalysisError> {
        let mut percentages = [0.0_f64; 9];
        for (index, (digit, pct)) in entries.into_iter().enumerate() {
            if !DIGITS.contains(&digit) {
                return Err(AnalysisError::ValueRange {
                    index,
                    value: i64::from(digit),
                });
            }
            if !pct.is_finite() || pct < 0.0 {
                return Err(AnalysisError::InvalidPercentage { digit, value: pct });
            }
            percentages[usize::from(digit - 1)] = pct;
        }
        Ok(Self::from_dense(percentages))
    }

    /// Wrap an already dense percentage table (index `d - 1` is digit `d`).
    #[must_use]
    pub(crate) const fn from_dense(percentages: [f64; 9]) -> Self {
        Self {
            percentages,
            counts: [0; 9],
            total: 0,
        }
    }

    /// Percentage for `digit`, or `None` outside 1–9.
    #[must_use]
    pub fn percentage(&self, digit: u8) -> Option<f64> {
        DIGITS
            .contains(&digit)
            .then(|| self.percentages[usize::from(digit - 1)])
    }

    /// Occurrence count for `digit`, or `None` outside 1–9.
    #[must_use]
    pub fn count(&self, digit: u8) -> Option<u64> {
        DIGITS
            .contains(&digit)
            .then(|| self.counts[usize::from(digit - 1)])
    }

    /// Number of values the histogram was computed from (0 when built from
    /// percentages).
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Iterate `(digit, percentage)` for digits 1–9 in order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        DIGITS.zip(self.percentages.iter().copied())
    }

    /// Sum of all percentages.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.percentages.iter().sum()
    }
}
