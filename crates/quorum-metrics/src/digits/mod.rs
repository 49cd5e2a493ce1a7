//! Leading-digit analysis against Benford's law.
//!
//! ## Pipeline
//!
//! ```text
//! &[i64]  (positive magnitudes)
//!        ↓  leading::LeadingDigitHistogram::from_sample()
//! LeadingDigitHistogram (dense, percentages over digits 1–9)
//!        ↓  benford::deviation()
//! DeviationScore (mean absolute deviation, percentage points)
//! ```

pub mod benford;
pub mod leading;

pub use benford::{
    BENFORD_REFERENCE, DEFAULT_ANOMALY_THRESHOLD, DeviationScore, DigitComparison, compare,
    deviation, reference_histogram,
};
pub use leading::{LeadingDigitHistogram, leading_digit, positive_only};
