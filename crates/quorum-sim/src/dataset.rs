//! Illustrative relationship dataset.
//!
//! A small command structure: a few controllers, the assets and
//! institutions they direct, and one chain that leads back into the
//! controllers' orbit. The controllers carry no incoming edges; once the
//! edges are reversed they collect the authority of everything below them.

use quorum_core::{AnalysisError, Relationship, RelationshipRecord, validate_records};

const DEMO_EDGES: [(&str, &str, &str); 11] = [
    ("Chief Strategist", "Executive", "puppeteer"),
    ("Chief Strategist", "Intelligence Service", "control"),
    ("Finance Director", "Financial Flows", "control"),
    ("Finance Director", "Mining Revenue", "control"),
    ("Security Chief", "Armed Forces", "control"),
    ("Security Chief", "Ports & Airports", "logistics"),
    ("Trafficking Network", "Proxy Militias", "proxy force"),
    ("Executive", "Street Gang", "export strategy"),
    ("Street Gang", "Migration Routes", "extortion"),
    ("Electoral General", "Electoral Results", "manipulation"),
    ("Chief Strategist", "Electoral General", "oversight"),
];

/// The demo dataset as raw records, the shape a JSON input file would
/// deserialize into.
#[must_use]
pub fn demo_records() -> Vec<RelationshipRecord> {
    DEMO_EDGES
        .iter()
        .map(|&(source, target, kind)| RelationshipRecord {
            source: Some(source.to_owned()),
            target: Some(target.to_owned()),
            kind: Some(kind.to_owned()),
        })
        .collect()
}

/// The demo dataset as validated relationships.
///
/// # Errors
///
/// Returns [`AnalysisError::DataFormat`] only if the built-in table is
/// malformed.
pub fn demo_relationships() -> Result<Vec<Relationship>, AnalysisError> {
    validate_records(&demo_records())
}
