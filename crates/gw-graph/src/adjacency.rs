//! Compact adjacency view.
//!
//! Neighbor lists are stored as one flat array plus per-vertex offsets.
//! Vertex `i`'s neighbors live in `neighbors[offsets[i]..offsets[i + 1]]`,
//! in the order the edges producing them were inserted into the graph.
//! Traversal order downstream depends on this ordering, not on vertex ids.

use gw_core::VertexId;

use crate::graph::{Edge, Graph};

/// Read-only neighbor lists for every vertex of a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    /// Length `vertex_count + 1`.
    offsets: Vec<usize>,
    neighbors: Vec<VertexId>,
}

impl Adjacency {
    /// Build the adjacency the graph's mode implies.
    ///
    /// Scans edges in insertion order; each `(u, v)` appends `v` to `u`'s
    /// list and, only when undirected, `u` to `v`'s list.
    pub fn from_graph(graph: &Graph) -> Self {
        Self::build(graph.vertex_count(), graph.edges(), !graph.is_directed())
    }

    /// Build the direction-ignoring adjacency: both endpoints see each other
    /// even in a directed graph. An antiparallel pair contributes twice.
    pub fn symmetric(graph: &Graph) -> Self {
        Self::build(graph.vertex_count(), graph.edges(), true)
    }

    fn build(vertex_count: usize, edges: &[Edge], mirror: bool) -> Self {
        // Count degrees first so the flat list is filled in one pass
        let mut degree = vec![0usize; vertex_count];
        for edge in edges {
            degree[edge.from.index()] += 1;
            if mirror {
                degree[edge.to.index()] += 1;
            }
        }

        let mut offsets = Vec::with_capacity(vertex_count + 1);
        offsets.push(0);
        for d in &degree {
            offsets.push(offsets[offsets.len() - 1] + d);
        }

        // Fill slots in edge order; `cursor[i]` is the next free slot of vertex i
        let mut cursor: Vec<usize> = offsets[..vertex_count].to_vec();
        let mut neighbors = vec![VertexId::from_index(0); offsets[vertex_count]];
        for edge in edges {
            neighbors[cursor[edge.from.index()]] = edge.to;
            cursor[edge.from.index()] += 1;
            if mirror {
                neighbors[cursor[edge.to.index()]] = edge.from;
                cursor[edge.to.index()] += 1;
            }
        }

        Self { offsets, neighbors }
    }

    pub fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Neighbors of `v` in insertion order. Empty for an unknown vertex.
    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        let idx = v.index();
        if idx >= self.vertex_count() {
            return &[];
        }
        &self.neighbors[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// Length of `v`'s neighbor list (out-degree when directed).
    pub fn degree(&self, v: VertexId) -> usize {
        self.neighbors(v).len()
    }

    /// Owned copy of every neighbor list, indexed by vertex.
    pub fn to_lists(&self) -> Vec<Vec<VertexId>> {
        (0..self.vertex_count())
            .map(|i| self.neighbors(VertexId::from_index(i)).to_vec())
            .collect()
    }
}
