//! Breadth-first and depth-first traversal.

use std::collections::VecDeque;
use std::sync::Arc;

use gw_core::{GwResult, VertexId};
use gw_graph::{Adjacency, Graph};

use crate::steps::{Step, StepSource, Steps};

/// Visitation order and discovery links of one traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    /// Vertices in the order they were visited, starting with the start vertex.
    pub order: Vec<VertexId>,
    /// `parent[v]` is the vertex `v` was reached from; None for the start
    /// vertex and for unreached vertices.
    pub parent: Vec<Option<VertexId>>,
}

impl Traversal {
    fn new(vertex_count: usize) -> Self {
        Self {
            order: Vec::new(),
            parent: vec![None; vertex_count],
        }
    }

    pub fn start(&self) -> Option<VertexId> {
        self.order.first().copied()
    }

    pub fn reached(&self, v: VertexId) -> bool {
        self.order.first() == Some(&v) || self.parent.get(v.index()).is_some_and(Option::is_some)
    }

    /// Discovery edges `(parent, child)` in visitation order.
    pub fn tree_edges(&self) -> Vec<(VertexId, VertexId)> {
        self.order
            .iter()
            .filter_map(|&v| self.parent[v.index()].map(|p| (p, v)))
            .collect()
    }

    /// Number of tree edges between the start vertex and each vertex.
    ///
    /// Equals the BFS distance when the traversal was breadth-first.
    pub fn depths(&self) -> Vec<Option<usize>> {
        let mut depth = vec![None; self.parent.len()];
        // Parents are always visited before their children
        for &v in &self.order {
            depth[v.index()] = match self.parent[v.index()] {
                None => Some(0),
                Some(p) => depth[p.index()].map(|d: usize| d + 1),
            };
        }
        depth
    }
}

/// BFS over the graph's adjacency from `start`, run to completion.
pub fn bfs(graph: &Graph, start: VertexId) -> GwResult<Traversal> {
    Ok(bfs_steps(graph, start)?.finish())
}

/// BFS as a lazy step sequence.
pub fn bfs_steps(graph: &Graph, start: VertexId) -> GwResult<Steps<Bfs>> {
    graph.check_vertex(start)?;
    Ok(Steps::new(Bfs::over(Arc::new(graph.adjacency()), start)))
}

/// DFS over the graph's adjacency from `start`, run to completion.
pub fn dfs(graph: &Graph, start: VertexId) -> GwResult<Traversal> {
    Ok(dfs_steps(graph, start)?.finish())
}

/// DFS as a lazy step sequence.
pub fn dfs_steps(graph: &Graph, start: VertexId) -> GwResult<Steps<Dfs>> {
    graph.check_vertex(start)?;
    Ok(Steps::new(Dfs::over(graph.adjacency(), start)))
}

/// Breadth-first walk state.
///
/// A vertex is marked visited when it is enqueued, so each vertex enters
/// the queue at most once. One `advance` dequeues one vertex.
#[derive(Debug)]
pub struct Bfs {
    adjacency: Arc<Adjacency>,
    queue: VecDeque<VertexId>,
    visited: Vec<bool>,
    result: Traversal,
}

impl Bfs {
    /// `start` must be a vertex of `adjacency`.
    pub(crate) fn over(adjacency: Arc<Adjacency>, start: VertexId) -> Self {
        let n = adjacency.vertex_count();
        let mut visited = vec![false; n];
        visited[start.index()] = true;
        Self {
            adjacency,
            queue: VecDeque::from([start]),
            visited,
            result: Traversal::new(n),
        }
    }

    pub(crate) fn traversal(&self) -> &Traversal {
        &self.result
    }
}

impl StepSource for Bfs {
    type Output = Traversal;

    fn advance(&mut self, events: &mut VecDeque<Step>) -> bool {
        let Some(u) = self.queue.pop_front() else {
            return false;
        };
        self.result.order.push(u);
        events.push_back(Step::VertexVisited(u));

        for &v in self.adjacency.neighbors(u) {
            if !self.visited[v.index()] {
                self.visited[v.index()] = true;
                self.result.parent[v.index()] = Some(u);
                self.queue.push_back(v);
                events.push_back(Step::EdgeTraversed(u, v));
            }
        }
        true
    }

    fn into_output(self) -> Traversal {
        tracing::debug!(visited = self.result.order.len(), "bfs finished");
        self.result
    }
}

/// Depth-first walk state.
///
/// Uses an explicit stack of `(vertex, cursor)` frames, where `cursor` is the
/// position of the next neighbor to consider. A vertex is marked visited
/// when it is first descended into. One `advance` either descends one edge
/// or retires one frame.
#[derive(Debug)]
pub struct Dfs {
    adjacency: Adjacency,
    stack: Vec<(VertexId, usize)>,
    visited: Vec<bool>,
    start: Option<VertexId>,
    result: Traversal,
}

impl Dfs {
    fn over(adjacency: Adjacency, start: VertexId) -> Self {
        let n = adjacency.vertex_count();
        Self {
            adjacency,
            stack: Vec::new(),
            visited: vec![false; n],
            start: Some(start),
            result: Traversal::new(n),
        }
    }

    fn descend(&mut self, v: VertexId, events: &mut VecDeque<Step>) {
        self.visited[v.index()] = true;
        self.result.order.push(v);
        self.stack.push((v, 0));
        events.push_back(Step::VertexVisited(v));
    }
}

impl StepSource for Dfs {
    type Output = Traversal;

    fn advance(&mut self, events: &mut VecDeque<Step>) -> bool {
        if let Some(start) = self.start.take() {
            self.descend(start, events);
            return true;
        }
        let Some(&(u, cursor)) = self.stack.last() else {
            return false;
        };

        let neighbors = self.adjacency.neighbors(u);
        let next = neighbors[cursor..]
            .iter()
            .position(|w| !self.visited[w.index()])
            .map(|offset| (cursor + offset, neighbors[cursor + offset]));

        match next {
            Some((at, v)) => {
                if let Some(frame) = self.stack.last_mut() {
                    frame.1 = at + 1;
                }
                self.result.parent[v.index()] = Some(u);
                events.push_back(Step::EdgeTraversed(u, v));
                self.descend(v, events);
            }
            None => {
                self.stack.pop();
            }
        }
        true
    }

    fn into_output(self) -> Traversal {
        tracing::debug!(visited = self.result.order.len(), "dfs finished");
        self.result
    }
}
