//! Unweighted shortest paths by BFS.
//!
//! Every edge counts as length 1 whatever the graph's weights are.

use std::collections::VecDeque;
use std::sync::Arc;

use gw_core::{DEFAULT_WEIGHT, GwResult, VertexId};
use gw_graph::Graph;
use rayon::prelude::*;

use crate::steps::{Step, StepSource, Steps};
use crate::traversal::{Bfs, Traversal};

/// A shortest path, source first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Number of edges on the path.
    pub distance: usize,
    pub vertices: Vec<VertexId>,
}

/// Result of a shortest-path query. An unreachable target is an ordinary
/// outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    Found(Path),
    NoPath,
}

impl PathOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            PathOutcome::Found(path) => Some(path),
            PathOutcome::NoPath => None,
        }
    }
}

/// Shortest path from `source` to `target`, counting edges.
pub fn shortest_path(graph: &Graph, source: VertexId, target: VertexId) -> GwResult<PathOutcome> {
    Ok(shortest_path_steps(graph, source, target)?.finish())
}

/// Shortest path as a lazy step sequence: the BFS events, then one
/// `EdgeCommitted` per edge of the path found.
pub fn shortest_path_steps(
    graph: &Graph,
    source: VertexId,
    target: VertexId,
) -> GwResult<Steps<ShortestPath>> {
    graph.check_vertex(source)?;
    graph.check_vertex(target)?;
    Ok(Steps::new(ShortestPath {
        search: Bfs::over(Arc::new(graph.adjacency()), source),
        target,
        outcome: None,
    }))
}

/// BFS distance between every ordered pair of vertices; `m[s][t]` is None
/// when `t` is unreachable from `s`. One BFS per source, run in parallel.
pub fn distance_matrix(graph: &Graph) -> Vec<Vec<Option<usize>>> {
    let adjacency = Arc::new(graph.adjacency());
    (0..graph.vertex_count())
        .into_par_iter()
        .map(|s| {
            Steps::new(Bfs::over(Arc::clone(&adjacency), VertexId::from_index(s)))
                .finish()
                .depths()
        })
        .collect()
}

/// Shortest-path search state: a full BFS from the source, then path
/// reconstruction.
#[derive(Debug)]
pub struct ShortestPath {
    search: Bfs,
    target: VertexId,
    outcome: Option<PathOutcome>,
}

impl ShortestPath {
    /// Follow parent links back from the target, then reverse.
    fn resolve(traversal: &Traversal, target: VertexId) -> PathOutcome {
        if !traversal.reached(target) {
            return PathOutcome::NoPath;
        }
        let mut vertices = vec![target];
        let mut current = target;
        while let Some(prev) = traversal.parent[current.index()] {
            vertices.push(prev);
            current = prev;
        }
        vertices.reverse();
        PathOutcome::Found(Path {
            distance: vertices.len() - 1,
            vertices,
        })
    }
}

impl StepSource for ShortestPath {
    type Output = PathOutcome;

    fn advance(&mut self, events: &mut VecDeque<Step>) -> bool {
        if self.search.advance(events) {
            return true;
        }
        if self.outcome.is_some() {
            return false;
        }
        let outcome = Self::resolve(self.search.traversal(), self.target);
        if let PathOutcome::Found(path) = &outcome {
            for pair in path.vertices.windows(2) {
                events.push_back(Step::EdgeCommitted {
                    from: pair[0],
                    to: pair[1],
                    weight: DEFAULT_WEIGHT,
                });
            }
        }
        self.outcome = Some(outcome);
        true
    }

    fn into_output(self) -> PathOutcome {
        let outcome = match self.outcome {
            Some(outcome) => outcome,
            None => Self::resolve(self.search.traversal(), self.target),
        };
        tracing::debug!(
            target_vertex = %self.target,
            distance = outcome.path().map(|p| p.distance),
            "shortest path resolved"
        );
        outcome
    }
}
