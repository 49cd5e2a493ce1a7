//! Centrality metrics over the relationship graph.
//!
//! - **Authority** (`authority`): PageRank over the reversed graph. Which
//!   entities do the others ultimately trace back to?
//!
//! ```rust,ignore
//! use quorum_metrics::graph::DirectedGraph;
//! use quorum_metrics::metrics::authority::{RankConfig, rank};
//!
//! let graph = DirectedGraph::from_relationships(&relationships);
//! let scores = rank(&graph, &RankConfig::default())?;
//! for entry in scores.leaders(0.08) {
//!     println!("{} {:.4}", entry.id, entry.score);
//! }
//! ```

pub mod authority;

pub use authority::{AuthorityScore, RankConfig, RankedEntity, rank};
