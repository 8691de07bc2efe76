//! Graph file schema and conversion to and from the graph model.

use std::collections::{BTreeMap, HashMap};

use gw_core::{VertexId, Weight};
use gw_graph::{Edge, Graph};
use serde::{Deserialize, Serialize};

use crate::ProjectResult;
use crate::validate::{ValidationError, validate_file};

/// Canvas position of a vertex. Kept for the renderer, unused by algorithms.
pub type Position = (f64, f64);

/// On-disk graph record.
///
/// `weights` is keyed by `"u,v"` in the edge's stored direction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GraphFile {
    pub vertices: Vec<Position>,
    pub edges: Vec<(usize, usize)>,
    #[serde(default)]
    pub weights: BTreeMap<String, Weight>,
    #[serde(default)]
    pub is_directed: bool,
    #[serde(default)]
    pub is_weighted: bool,
}

/// Format an edge as a weight map key.
pub fn weight_key(from: usize, to: usize) -> String {
    format!("{},{}", from, to)
}

/// Parse a `"u,v"` weight map key. Whitespace around either index is allowed.
pub fn parse_weight_key(key: &str) -> Option<(usize, usize)> {
    let (from, to) = key.split_once(',')?;
    Some((from.trim().parse().ok()?, to.trim().parse().ok()?))
}

fn vertex(index: usize) -> ProjectResult<VertexId> {
    VertexId::try_from_index(index).ok_or_else(|| {
        ValidationError::TooManyVertices {
            vertices: index.saturating_add(1),
        }
        .into()
    })
}

impl GraphFile {
    /// Validate and build the graph model plus vertex positions.
    pub fn to_model(&self) -> ProjectResult<(Graph, Vec<Position>)> {
        validate_file(self)?;

        let mut weights = HashMap::with_capacity(self.weights.len());
        for (key, &w) in &self.weights {
            if let Some(edge) = parse_weight_key(key) {
                weights.insert(edge, w);
            }
        }

        let mut edges = Vec::with_capacity(self.edges.len());
        for &(from, to) in &self.edges {
            let edge = Edge::new(vertex(from)?, vertex(to)?);
            edges.push((edge, weights.get(&(from, to)).copied()));
        }

        let graph = Graph::from_parts(
            self.vertices.len(),
            edges,
            self.is_directed,
            self.is_weighted,
        )?;
        Ok((graph, self.vertices.clone()))
    }

    /// Snapshot a graph model. `positions` must have one entry per vertex.
    pub fn from_model(graph: &Graph, positions: &[Position]) -> ProjectResult<Self> {
        if positions.len() != graph.vertex_count() {
            return Err(ValidationError::PositionCount {
                positions: positions.len(),
                vertices: graph.vertex_count(),
            }
            .into());
        }
        Ok(Self {
            vertices: positions.to_vec(),
            edges: graph
                .edges()
                .iter()
                .map(|e| (e.from.index(), e.to.index()))
                .collect(),
            weights: graph
                .stored_weights()
                .map(|(e, w)| (weight_key(e.from.index(), e.to.index()), w))
                .collect(),
            is_directed: graph.is_directed(),
            is_weighted: graph.is_weighted(),
        })
    }

    /// Remove a vertex, renumbering edges and weight keys the way the model
    /// does and dropping its position.
    pub fn remove_vertex(&mut self, v: VertexId) -> ProjectResult<()> {
        let (mut graph, mut positions) = self.to_model()?;
        graph.remove_vertex(v)?;
        positions.remove(v.index());
        *self = Self::from_model(&graph, &positions)?;
        Ok(())
    }
}
