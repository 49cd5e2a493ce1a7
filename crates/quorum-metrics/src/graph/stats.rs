//! Basic graph statistics for the relationship graph.
//!
//! # Statistics Provided
//!
//! - **node_count**: Number of distinct entities.
//! - **edge_count**: Number of collapsed edges.
//! - **relationship_count**: Number of input relationships, parallel ones
//!   counted individually.
//! - **collapsed_relationships**: `relationship_count - edge_count`.
//! - **density**: `edge_count / (node_count * (node_count - 1))`; 0.0 for
//!   graphs with fewer than two nodes.
//! - **sources**: Entities nothing points at (no in-edges). These are the
//!   candidates for root controllers.
//! - **sinks**: Entities with no out-edges (pure targets).
//! - **isolated**: Entities with neither in- nor out-edges.
//! - **max_in_degree** / **max_out_degree**.

use serde::Serialize;

use crate::graph::build::DirectedGraph;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a [`DirectedGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub relationship_count: usize,
    pub collapsed_relationships: usize,
    pub density: f64,
    /// Entity IDs with no in-edges, sorted.
    pub sources: Vec<String>,
    /// Entity IDs with no out-edges, sorted.
    pub sinks: Vec<String>,
    /// Entity IDs with no edges at all, sorted.
    pub isolated: Vec<String>,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

impl GraphStats {
    /// Compute statistics from a [`DirectedGraph`].
    #[must_use]
    pub fn from_graph(graph: &DirectedGraph) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();
        let in_degrees = graph.in_degrees();

        let mut sources = Vec::new();
        let mut sinks = Vec::new();
        let mut isolated = Vec::new();
        let mut max_out_degree = 0;

        for (idx, id) in graph.nodes().iter().enumerate() {
            let out_degree = graph.successors(idx).len();
            let in_degree = in_degrees[idx];
            max_out_degree = max_out_degree.max(out_degree);

            if in_degree == 0 {
                sources.push(id.to_string());
            }
            if out_degree == 0 {
                sinks.push(id.to_string());
            }
            if in_degree == 0 && out_degree == 0 {
                isolated.push(id.to_string());
            }
        }

        Self {
            node_count,
            edge_count,
            relationship_count: graph.relationship_count(),
            collapsed_relationships: graph.relationship_count().saturating_sub(edge_count),
            density: compute_density(node_count, edge_count),
            sources,
            sinks,
            isolated,
            max_in_degree: in_degrees.iter().copied().max().unwrap_or(0),
            max_out_degree,
        }
    }

    /// Return `true` if the graph has no edges.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}
