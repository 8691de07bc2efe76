//! Graph file validation.

use std::collections::HashSet;

use gw_core::{MAX_WEIGHT, VertexId, Weight};

use crate::schema::{GraphFile, parse_weight_key};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Edge {from},{to} references vertex outside 0..{vertices}")]
    EndpointOutOfRange {
        from: usize,
        to: usize,
        vertices: usize,
    },

    #[error("Edge {vertex},{vertex} is a self loop")]
    SelfLoop { vertex: usize },

    #[error("Duplicate edge: {from},{to}")]
    DuplicateEdge { from: usize, to: usize },

    #[error("Malformed weight key: '{key}' (expected \"u,v\")")]
    MalformedWeightKey { key: String },

    #[error("Weight key '{key}' names no stored edge")]
    UnknownWeightEdge { key: String },

    #[error("Weight key '{key}' names an edge another key already weighs")]
    DuplicateWeightKey { key: String },

    #[error("Weight {weight} for '{key}' exceeds the maximum of {max}", max = MAX_WEIGHT)]
    WeightOutOfRange { key: String, weight: Weight },

    #[error("Too many vertices: {vertices}")]
    TooManyVertices { vertices: usize },

    #[error("{positions} positions for {vertices} vertices")]
    PositionCount { positions: usize, vertices: usize },
}

/// Check a file against the graph model's invariants before conversion.
pub fn validate_file(file: &GraphFile) -> Result<(), ValidationError> {
    let vertices = file.vertices.len();
    if vertices > 0 && VertexId::try_from_index(vertices - 1).is_none() {
        return Err(ValidationError::TooManyVertices { vertices });
    }
    let mut seen = HashSet::new();

    for &(from, to) in &file.edges {
        if from >= vertices || to >= vertices {
            return Err(ValidationError::EndpointOutOfRange { from, to, vertices });
        }
        if from == to {
            return Err(ValidationError::SelfLoop { vertex: from });
        }
        let duplicate = seen.contains(&(from, to))
            || (!file.is_directed && seen.contains(&(to, from)));
        if duplicate {
            return Err(ValidationError::DuplicateEdge { from, to });
        }
        seen.insert((from, to));
    }

    let mut weighed = HashSet::new();
    for (key, &weight) in &file.weights {
        let Some(edge) = parse_weight_key(key) else {
            return Err(ValidationError::MalformedWeightKey { key: key.clone() });
        };
        // Keys follow the stored direction, even for undirected graphs
        if !seen.contains(&edge) {
            return Err(ValidationError::UnknownWeightEdge { key: key.clone() });
        }
        // "0,1" and " 0,1" are distinct map keys for the same edge
        if !weighed.insert(edge) {
            return Err(ValidationError::DuplicateWeightKey { key: key.clone() });
        }
        if weight > MAX_WEIGHT {
            return Err(ValidationError::WeightOutOfRange {
                key: key.clone(),
                weight,
            });
        }
    }

    Ok(())
}
