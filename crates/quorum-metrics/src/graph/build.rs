//! Graph construction from relationship records.
//!
//! # Overview
//!
//! [`DirectedGraph`] is a compact adjacency list built once from a sequence
//! of [`Relationship`]s and never mutated afterwards.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "A acts on B" (A controls, oversees, or directs B),
//! exactly as written in the relationship record. Ranking reverses this
//! direction; see [`crate::metrics::authority`].
//!
//! ## Canonical Order
//!
//! Nodes are indexed in ascending [`EntityId`] order and each adjacency list
//! is sorted. Two inputs containing the same relationships in a different
//! order therefore produce identical graphs, down to the index layout.
//!
//! ## Parallel Relationships
//!
//! Several relationships between the same ordered pair collapse into one
//! edge. Their distinct `kind` labels are kept per edge for display, and
//! [`DirectedGraph::relationship_count`] still reports the raw input size.
//!
//! ## Content Hash
//!
//! [`DirectedGraph::content_hash`] is a BLAKE3 hash of the sorted edge set
//! (node names included), formatted `blake3:<hex>`. It changes only when the
//! collapsed edge set or node set changes.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, BTreeSet, HashMap};

use quorum_core::{AnalysisError, EntityId, Relationship, RelationshipRecord, validate_records};
use tracing::instrument;

// ---------------------------------------------------------------------------
// DirectedGraph
// ---------------------------------------------------------------------------

/// A directed relationship graph with deduplicated edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectedGraph {
    /// Node labels, sorted ascending; a node's index is its position here.
    nodes: Vec<EntityId>,
    /// Mapping from entity ID to node index.
    node_map: HashMap<EntityId, usize>,
    /// Outgoing neighbors per node, sorted ascending and deduplicated.
    out_edges: Vec<Vec<usize>>,
    /// Distinct relationship kinds per collapsed edge, sorted.
    edge_kinds: BTreeMap<(usize, usize), Vec<String>>,
    /// Number of relationships the graph was built from.
    relationship_count: usize,
    /// BLAKE3 content hash of the edge set.
    content_hash: String,
}

impl DirectedGraph {
    /// Build a graph whose node set is exactly the relationship endpoints.
    #[must_use]
    #[instrument(skip(relationships), fields(relationships = relationships.len()))]
    pub fn from_relationships(relationships: &[Relationship]) -> Self {
        Self::from_parts(std::iter::empty(), relationships)
    }

    /// Shape-check raw records and build the graph.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DataFormat`] for the first record with a
    /// missing or blank `source`/`target`.
    pub fn from_records(records: &[RelationshipRecord]) -> Result<Self, AnalysisError> {
        let relationships = validate_records(records)?;
        Ok(Self::from_relationships(&relationships))
    }

    /// Build a graph that also contains `extra_nodes`, which may have no
    /// relationships at all.
    #[must_use]
    pub fn from_parts(
        extra_nodes: impl IntoIterator<Item = EntityId>,
        relationships: &[Relationship],
    ) -> Self {
        let mut ids: BTreeSet<EntityId> = extra_nodes.into_iter().collect();
        for rel in relationships {
            ids.insert(rel.source.clone());
            ids.insert(rel.target.clone());
        }

        let nodes: Vec<EntityId> = ids.into_iter().collect();
        let node_map: HashMap<EntityId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();

        // Collapse parallel relationships, collecting their distinct kinds.
        let mut collapsed: BTreeMap<(usize, usize), BTreeSet<&str>> = BTreeMap::new();
        for rel in relationships {
            let (Some(&from), Some(&to)) = (node_map.get(&rel.source), node_map.get(&rel.target))
            else {
                continue;
            };
            let kinds = collapsed.entry((from, to)).or_default();
            if !rel.kind.is_empty() {
                kinds.insert(rel.kind.as_str());
            }
        }

        let mut out_edges = vec![Vec::new(); nodes.len()];
        for &(from, to) in collapsed.keys() {
            out_edges[from].push(to);
        }

        let content_hash = compute_edge_hash(&nodes, collapsed.keys().copied());

        let edge_kinds = collapsed
            .into_iter()
            .map(|(edge, kinds)| (edge, kinds.into_iter().map(str::to_string).collect()))
            .collect();

        Self {
            nodes,
            node_map,
            out_edges,
            edge_kinds,
            relationship_count: relationships.len(),
            content_hash,
        }
    }

    /// Return the number of nodes (entities) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of collapsed edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_kinds.len()
    }

    /// Return the number of relationships the graph was built from,
    /// counting parallel relationships individually.
    #[must_use]
    pub const fn relationship_count(&self) -> usize {
        self.relationship_count
    }

    /// All node labels in index order.
    #[must_use]
    pub fn nodes(&self) -> &[EntityId] {
        &self.nodes
    }

    /// Look up the node index for an entity ID.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.node_map.get(id).copied()
    }

    /// Return the entity label for a node index.
    #[must_use]
    pub fn entity(&self, idx: usize) -> Option<&EntityId> {
        self.nodes.get(idx)
    }

    /// Outgoing neighbors of `idx`, sorted ascending. Empty for unknown indices.
    #[must_use]
    pub fn successors(&self, idx: usize) -> &[usize] {
        self.out_edges.get(idx).map_or(&[][..], Vec::as_slice)
    }

    /// Iterate collapsed edges as `(source, target)` index pairs in sorted order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edge_kinds.keys().copied()
    }

    /// Distinct relationship kinds recorded for the edge `source → target`.
    #[must_use]
    pub fn edge_kinds(&self, source: &str, target: &str) -> Option<&[String]> {
        let from = self.node_index(source)?;
        let to = self.node_index(target)?;
        self.edge_kinds.get(&(from, to)).map(Vec::as_slice)
    }

    /// BLAKE3 content hash of the edge set.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Build the transposed adjacency list: `u → v` becomes `v → u`.
    ///
    /// Lists come out sorted because sources are visited in index order.
    #[must_use]
    pub fn reversed(&self) -> Vec<Vec<usize>> {
        let mut reversed = vec![Vec::new(); self.nodes.len()];
        for (from, targets) in self.out_edges.iter().enumerate() {
            for &to in targets {
                reversed[to].push(from);
            }
        }
        reversed
    }

    /// In-degree per node index in the original direction.
    #[must_use]
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.nodes.len()];
        for targets in &self.out_edges {
            for &to in targets {
                degrees[to] += 1;
            }
        }
        degrees
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Compute a BLAKE3 hash over the node set and the sorted edge list.
fn compute_edge_hash(nodes: &[EntityId], edges: impl Iterator<Item = (usize, usize)>) -> String {
    let mut hasher = blake3::Hasher::new();
    for node in nodes {
        hasher.update(node.as_str().as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for (from, to) in edges {
        hasher.update(nodes[from].as_str().as_bytes());
        hasher.update(b"\x00");
        hasher.update(nodes[to].as_str().as_bytes());
        hasher.update(b"\n");
    }
    format!("blake3:{}", hasher.finalize().to_hex())
}
