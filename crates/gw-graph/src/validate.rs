//! Graph validation logic.

use std::collections::HashSet;

use gw_core::{MAX_WEIGHT, Weight};

use crate::error::GraphError;
use crate::graph::{Edge, Graph};

/// Check that both endpoints exist and differ.
pub(crate) fn check_endpoints(vertex_count: usize, edge: Edge) -> Result<(), GraphError> {
    for vertex in [edge.from, edge.to] {
        if vertex.index() >= vertex_count {
            return Err(GraphError::InvalidVertex {
                vertex,
                count: vertex_count,
            });
        }
    }
    if edge.from == edge.to {
        return Err(GraphError::SelfLoop { vertex: edge.from });
    }
    Ok(())
}

pub(crate) fn check_weight(weight: Weight) -> Result<(), GraphError> {
    if weight > MAX_WEIGHT {
        return Err(GraphError::WeightOutOfRange { weight });
    }
    Ok(())
}

/// First edge whose reverse is also present, if any.
pub(crate) fn find_antiparallel(edges: &[Edge]) -> Option<Edge> {
    let present: HashSet<Edge> = edges.iter().copied().collect();
    edges
        .iter()
        .copied()
        .find(|edge| present.contains(&edge.reversed()))
}

/// Re-check every structural invariant of a graph: endpoints in range, no
/// self loops, no duplicates (mode-aware), and no weight entry for an edge
/// that is not stored.
pub(crate) fn validate_invariants(graph: &Graph) -> Result<(), GraphError> {
    let mut seen: HashSet<Edge> = HashSet::new();
    for &edge in graph.edges() {
        check_endpoints(graph.vertex_count(), edge)?;
        let duplicate =
            seen.contains(&edge) || (!graph.is_directed() && seen.contains(&edge.reversed()));
        if duplicate {
            return Err(GraphError::DuplicateEdge {
                from: edge.from,
                to: edge.to,
            });
        }
        seen.insert(edge);
    }

    for &edge in graph.weight_keys() {
        if !seen.contains(&edge) {
            return Err(GraphError::MissingEdge {
                from: edge.from,
                to: edge.to,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gw_core::VertexId;

    fn e(a: usize, b: usize) -> Edge {
        Edge::new(VertexId::from_index(a), VertexId::from_index(b))
    }

    #[test]
    fn endpoints_in_range() {
        assert!(check_endpoints(3, e(0, 2)).is_ok());
        assert!(matches!(
            check_endpoints(3, e(0, 3)),
            Err(GraphError::InvalidVertex { .. })
        ));
        assert!(matches!(
            check_endpoints(3, e(1, 1)),
            Err(GraphError::SelfLoop { .. })
        ));
    }

    #[test]
    fn antiparallel_detection() {
        assert_eq!(find_antiparallel(&[e(0, 1), e(1, 2)]), None);
        assert_eq!(find_antiparallel(&[e(0, 1), e(1, 2), e(1, 0)]), Some(e(0, 1)));
    }

    #[test]
    fn empty_graph_is_valid() {
        assert!(validate_invariants(&Graph::default()).is_ok());
    }
}
