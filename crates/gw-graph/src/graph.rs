//! Core graph data structures.

use std::collections::{HashMap, HashSet};

use gw_core::{DEFAULT_WEIGHT, VertexId, Weight};

use crate::adjacency::Adjacency;
use crate::error::GraphError;
use crate::validate;

/// An edge in its stored direction.
///
/// In an undirected graph the stored direction is the one given when the
/// edge was created; `(v, u)` is never stored alongside `(u, v)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
}

impl Edge {
    pub fn new(from: VertexId, to: VertexId) -> Self {
        Self { from, to }
    }

    /// The same connection in the opposite direction.
    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    /// True if `v` is either endpoint.
    pub fn touches(self, v: VertexId) -> bool {
        self.from == v || self.to == v
    }

    /// Endpoints renumbered for the removal of `removed`: every index above
    /// it moves down by one.
    pub(crate) fn shifted_past(self, removed: VertexId) -> Self {
        let shift = |x: VertexId| {
            if x > removed {
                VertexId::from_index(x.index() - 1)
            } else {
                x
            }
        };
        Self {
            from: shift(self.from),
            to: shift(self.to),
        }
    }
}

/// The graph model: contiguous vertices, insertion-ordered edges, a weight
/// map keyed by stored edge direction, and the directed/weighted mode flags.
///
/// Algorithms borrow a `Graph` read-only; only the methods here mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    vertex_count: usize,
    edges: Vec<Edge>,
    /// Mirror of `edges` for O(1) lookups.
    edge_set: HashSet<Edge>,
    weights: HashMap<Edge, Weight>,
    directed: bool,
    weighted: bool,
}

impl Graph {
    /// Create an empty graph in the given mode.
    pub fn new(directed: bool, weighted: bool) -> Self {
        Self {
            directed,
            weighted,
            ..Self::default()
        }
    }

    /// Build a graph from raw parts, applying the same checks as
    /// [`Graph::add_edge`] to every edge in order.
    pub fn from_parts<I>(
        vertex_count: usize,
        edges: I,
        directed: bool,
        weighted: bool,
    ) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (Edge, Option<Weight>)>,
    {
        let mut graph = Self::new(directed, weighted);
        graph.vertex_count = vertex_count;
        for (edge, weight) in edges {
            graph.insert_edge(edge, weight)?;
        }
        Ok(graph)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// All edges in insertion order, each in its stored direction.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All vertex ids in index order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + use<> {
        (0..self.vertex_count).map(VertexId::from_index)
    }

    /// Ok if `v` names an existing vertex.
    pub fn check_vertex(&self, v: VertexId) -> Result<(), GraphError> {
        if v.index() < self.vertex_count {
            Ok(())
        } else {
            Err(GraphError::InvalidVertex {
                vertex: v,
                count: self.vertex_count,
            })
        }
    }

    /// Append a vertex and return its id (always the current vertex count).
    pub fn add_vertex(&mut self) -> VertexId {
        let id = VertexId::from_index(self.vertex_count);
        self.vertex_count += 1;
        id
    }

    /// Add an edge without a stored weight (effective weight 1).
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> Result<(), GraphError> {
        self.insert_edge(Edge::new(from, to), None)
    }

    /// Add an edge with an explicit weight, at most [`gw_core::MAX_WEIGHT`].
    pub fn add_weighted_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        weight: Weight,
    ) -> Result<(), GraphError> {
        self.insert_edge(Edge::new(from, to), Some(weight))
    }

    fn insert_edge(&mut self, edge: Edge, weight: Option<Weight>) -> Result<(), GraphError> {
        validate::check_endpoints(self.vertex_count, edge)?;
        if let Some(weight) = weight {
            validate::check_weight(weight)?;
        }
        if self.find_edge(edge.from, edge.to).is_some() {
            return Err(GraphError::DuplicateEdge {
                from: edge.from,
                to: edge.to,
            });
        }
        self.edges.push(edge);
        self.edge_set.insert(edge);
        if let Some(weight) = weight {
            self.weights.insert(edge, weight);
        }
        Ok(())
    }

    /// The stored edge connecting `from` to `to`.
    ///
    /// Undirected graphs also match the reverse direction; the returned edge
    /// is always in stored direction.
    pub fn find_edge(&self, from: VertexId, to: VertexId) -> Option<Edge> {
        let forward = Edge::new(from, to);
        if self.edge_set.contains(&forward) {
            return Some(forward);
        }
        let backward = forward.reversed();
        if !self.directed && self.edge_set.contains(&backward) {
            return Some(backward);
        }
        None
    }

    pub fn contains_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.find_edge(from, to).is_some()
    }

    /// Effective weight of the edge between `from` and `to`, or None if
    /// there is no such edge.
    pub fn weight_of(&self, from: VertexId, to: VertexId) -> Option<Weight> {
        self.find_edge(from, to).map(|edge| self.effective_weight(edge))
    }

    /// Effective weight of a stored edge: 1 in an unweighted graph, else the
    /// stored entry or 1.
    pub fn effective_weight(&self, edge: Edge) -> Weight {
        if !self.weighted {
            return DEFAULT_WEIGHT;
        }
        self.weights.get(&edge).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Raw weight map entry for a stored edge, ignoring the weighted flag.
    pub fn stored_weight(&self, edge: Edge) -> Option<Weight> {
        self.weights.get(&edge).copied()
    }

    /// Raw weight map entries, in edge insertion order.
    pub fn stored_weights(&self) -> impl Iterator<Item = (Edge, Weight)> + '_ {
        self.edges
            .iter()
            .filter_map(|edge| self.weights.get(edge).map(|&w| (*edge, w)))
    }

    pub(crate) fn weight_keys(&self) -> impl Iterator<Item = &Edge> {
        self.weights.keys()
    }

    /// Overwrite the weight of an existing edge. Same bound as
    /// [`Graph::add_weighted_edge`].
    pub fn set_weight(
        &mut self,
        from: VertexId,
        to: VertexId,
        weight: Weight,
    ) -> Result<(), GraphError> {
        validate::check_weight(weight)?;
        let edge = self.existing_edge(from, to)?;
        self.weights.insert(edge, weight);
        Ok(())
    }

    /// Remove an edge and its weight entry.
    pub fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<(), GraphError> {
        let edge = self.existing_edge(from, to)?;
        self.edges.retain(|e| *e != edge);
        self.edge_set.remove(&edge);
        self.weights.remove(&edge);
        Ok(())
    }

    fn existing_edge(&self, from: VertexId, to: VertexId) -> Result<Edge, GraphError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        self.find_edge(from, to)
            .ok_or(GraphError::MissingEdge { from, to })
    }

    /// Remove a vertex with its incident edges and weights, then renumber
    /// every higher vertex down by one so ids stay contiguous.
    pub fn remove_vertex(&mut self, v: VertexId) -> Result<(), GraphError> {
        self.check_vertex(v)?;

        self.edges = self
            .edges
            .iter()
            .filter(|e| !e.touches(v))
            .map(|e| e.shifted_past(v))
            .collect();
        self.weights = self
            .weights
            .drain()
            .filter(|(e, _)| !e.touches(v))
            .map(|(e, w)| (e.shifted_past(v), w))
            .collect();
        self.edge_set = self.edges.iter().copied().collect();
        self.vertex_count -= 1;

        debug_assert!(validate::validate_invariants(self).is_ok());
        Ok(())
    }

    /// Drop every vertex, edge and weight. The mode flags are kept.
    pub fn clear(&mut self) {
        self.vertex_count = 0;
        self.edges.clear();
        self.edge_set.clear();
        self.weights.clear();
    }

    /// Switch between directed and undirected mode.
    ///
    /// Going undirected fails, leaving the graph untouched, while both
    /// `(u, v)` and `(v, u)` are stored.
    pub fn set_directed(&mut self, directed: bool) -> Result<(), GraphError> {
        if self.directed && !directed {
            if let Some(edge) = validate::find_antiparallel(&self.edges) {
                return Err(GraphError::DuplicateEdge {
                    from: edge.from,
                    to: edge.to,
                });
            }
        }
        self.directed = directed;
        Ok(())
    }

    /// Switch weighted mode. Stored weights survive a round trip through
    /// unweighted mode.
    pub fn set_weighted(&mut self, weighted: bool) {
        self.weighted = weighted;
    }

    /// Adjacency view in edge insertion order (see [`Adjacency::from_graph`]).
    pub fn adjacency(&self) -> Adjacency {
        Adjacency::from_graph(self)
    }
}
