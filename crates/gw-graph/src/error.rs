//! Graph-specific error types.

use gw_core::{GwError, MAX_WEIGHT, VertexId, Weight};

/// Graph construction and mutation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex index is outside `0..count`.
    InvalidVertex { vertex: VertexId, count: usize },

    /// An edge would connect a vertex to itself.
    SelfLoop { vertex: VertexId },

    /// The edge (or, when undirected, its reverse) is already present.
    DuplicateEdge { from: VertexId, to: VertexId },

    /// The edge to update or remove does not exist.
    MissingEdge { from: VertexId, to: VertexId },

    /// A weight above [`MAX_WEIGHT`].
    WeightOutOfRange { weight: Weight },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::InvalidVertex { vertex, count } => {
                write!(f, "Vertex {} does not exist (graph has {} vertices)", vertex, count)
            }
            GraphError::SelfLoop { vertex } => {
                write!(f, "Edge would loop vertex {} onto itself", vertex)
            }
            GraphError::DuplicateEdge { from, to } => {
                write!(f, "Edge ({}, {}) already exists", from, to)
            }
            GraphError::MissingEdge { from, to } => {
                write!(f, "Edge ({}, {}) does not exist", from, to)
            }
            GraphError::WeightOutOfRange { weight } => {
                write!(f, "Weight {} exceeds the maximum of {}", weight, MAX_WEIGHT)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for GwError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::InvalidVertex { vertex, count } => GwError::InvalidVertex {
                vertex: vertex.index(),
                count,
            },
            other => GwError::Invariant {
                what: other.to_string(),
            },
        }
    }
}
