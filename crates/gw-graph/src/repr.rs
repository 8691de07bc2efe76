//! Matrix, list and edge-list representations of a graph.
//!
//! All weights here are effective weights (1 everywhere when unweighted).

use gw_core::{VertexId, Weight};

use crate::graph::Graph;

/// One entry of a weighted adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedNeighbor {
    pub vertex: VertexId,
    pub weight: Weight,
}

impl Graph {
    /// `n x n` matrix where `m[u][v]` is the weight of edge `(u, v)`, or
    /// None when there is no such edge. Mirrored across the diagonal when
    /// undirected.
    pub fn adjacency_matrix(&self) -> Vec<Vec<Option<Weight>>> {
        let n = self.vertex_count();
        let mut matrix = vec![vec![None; n]; n];
        for &edge in self.edges() {
            let weight = Some(self.effective_weight(edge));
            matrix[edge.from.index()][edge.to.index()] = weight;
            if !self.is_directed() {
                matrix[edge.to.index()][edge.from.index()] = weight;
            }
        }
        matrix
    }

    /// Neighbor lists (adjacency order) annotated with edge weights.
    pub fn weighted_adjacency_list(&self) -> Vec<Vec<WeightedNeighbor>> {
        let adjacency = self.adjacency();
        self.vertices()
            .map(|u| {
                adjacency
                    .neighbors(u)
                    .iter()
                    .map(|&v| WeightedNeighbor {
                        vertex: v,
                        weight: self.weight_of(u, v).unwrap_or_default(),
                    })
                    .collect()
            })
            .collect()
    }

    /// `(from, to, weight)` for every edge in insertion order.
    pub fn edge_list(&self) -> Vec<(VertexId, VertexId, Weight)> {
        self.edges()
            .iter()
            .map(|&edge| (edge.from, edge.to, self.effective_weight(edge)))
            .collect()
    }
}
