#![no_main]

use libfuzzer_sys::fuzz_target;
use quorum_core::{AnalysisError, RelationshipRecord, validate_records};
use quorum_metrics::rank_authority;

fuzz_target!(|data: &[u8]| {
    let Ok(records) = serde_json::from_slice::<Vec<RelationshipRecord>>(data) else {
        return;
    };
    let relationships = match validate_records(&records) {
        Ok(relationships) => relationships,
        Err(AnalysisError::DataFormat { index, .. }) => {
            assert!(index < records.len());
            return;
        }
        Err(other) => panic!("unexpected error: {other}"),
    };

    let scores = rank_authority(&relationships).expect("default config is valid");
    if !relationships.is_empty() {
        assert!((scores.total() - 1.0).abs() < 1e-6, "total={}", scores.total());
        assert!(scores.scores.values().all(|s| s.is_finite() && *s >= 0.0));
    }
});
