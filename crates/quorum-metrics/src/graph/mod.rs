//! Relationship graph module.
//!
//! # Overview
//!
//! Builds an immutable adjacency-list graph from relationship records. The
//! graph feeds the authority ranking in [`crate::metrics::authority`].
//!
//! ## Pipeline
//!
//! ```text
//! &[RelationshipRecord]
//!        ↓  validate_records()          (DataFormat errors surface here)
//! Vec<Relationship>
//!        ↓  build::DirectedGraph::from_relationships()
//! DirectedGraph (sorted nodes, collapsed parallel edges)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, sources, sinks, …)
//! ```

pub mod build;
pub mod stats;

pub use build::DirectedGraph;
pub use stats::GraphStats;
