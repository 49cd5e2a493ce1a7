#![no_main]

use libfuzzer_sys::fuzz_target;
use quorum_core::AnalysisError;
use quorum_metrics::score_benford_deviation;

fuzz_target!(|data: &[u8]| {
    let sample: Vec<i64> = data
        .chunks_exact(8)
        .map(|chunk| {
            let mut bytes = [0_u8; 8];
            bytes.copy_from_slice(chunk);
            i64::from_le_bytes(bytes)
        })
        .collect();

    match score_benford_deviation(&sample) {
        Ok((histogram, score)) => {
            assert!((histogram.sum() - 100.0).abs() < 1e-6);
            assert!(score.value().is_finite() && score.value() >= 0.0);
        }
        Err(AnalysisError::EmptySample) => assert!(sample.is_empty()),
        Err(AnalysisError::ValueRange { index, value }) => {
            assert_eq!(sample[index], value);
            assert!(value <= 0);
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
});
