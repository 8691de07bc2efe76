//! Eulerian trails: degree-based classification and Hierholzer construction.

use std::collections::VecDeque;

use gw_core::VertexId;
use gw_graph::Graph;

use crate::steps::{Step, StepSource, Steps};

/// What kind of Eulerian trail the degree criterion allows.
///
/// The criterion ignores connectivity; [`hierholzer`] reports a graph whose
/// edges are split across components as [`EulerOutcome::NotConnected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EulerClass {
    /// No vertices at all.
    Empty,
    Circuit { start: VertexId },
    Path { start: VertexId, end: VertexId },
    NotEulerian,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EulerOutcome {
    /// Closed trail; first and last vertex coincide.
    Circuit(Vec<VertexId>),
    Path(Vec<VertexId>),
    NotEulerian,
    /// Degrees allow a trail but some edges are unreachable from its start.
    NotConnected,
}

impl EulerOutcome {
    pub fn trail(&self) -> Option<&[VertexId]> {
        match self {
            EulerOutcome::Circuit(trail) | EulerOutcome::Path(trail) => Some(trail),
            EulerOutcome::NotEulerian | EulerOutcome::NotConnected => None,
        }
    }
}

/// Classify by vertex degrees.
///
/// Undirected: zero odd-degree vertices give a circuit from vertex 0, exactly
/// two give a path between them (lower index first). Directed: every vertex
/// balanced gives a circuit from vertex 0; exactly one vertex with one more
/// out-edge than in-edges, one with the reverse and all others balanced
/// give a path from the former to the latter.
pub fn classify(graph: &Graph) -> EulerClass {
    if graph.is_empty() {
        return EulerClass::Empty;
    }
    let origin = VertexId::from_index(0);
    let adjacency = graph.adjacency();

    if !graph.is_directed() {
        let odd: Vec<VertexId> = graph
            .vertices()
            .filter(|&v| adjacency.degree(v) % 2 == 1)
            .collect();
        return match odd.as_slice() {
            [] => EulerClass::Circuit { start: origin },
            &[start, end] => EulerClass::Path { start, end },
            _ => EulerClass::NotEulerian,
        };
    }

    let mut in_degree = vec![0usize; graph.vertex_count()];
    for edge in graph.edges() {
        in_degree[edge.to.index()] += 1;
    }

    let mut start = None;
    let mut end = None;
    for v in graph.vertices() {
        let out = adjacency.degree(v);
        let inn = in_degree[v.index()];
        if out == inn {
            continue;
        }
        if out == inn + 1 && start.is_none() {
            start = Some(v);
        } else if inn == out + 1 && end.is_none() {
            end = Some(v);
        } else {
            return EulerClass::NotEulerian;
        }
    }

    match (start, end) {
        (None, None) => EulerClass::Circuit { start: origin },
        (Some(start), Some(end)) => EulerClass::Path { start, end },
        _ => EulerClass::NotEulerian,
    }
}

/// Build an Eulerian circuit or path with Hierholzer's algorithm.
///
/// An empty graph yields an empty circuit.
pub fn hierholzer(graph: &Graph) -> EulerOutcome {
    hierholzer_steps(graph).finish()
}

/// Hierholzer as a lazy step sequence: `EdgeTraversed` each time an edge
/// is consumed and `VertexCommitted` each time a vertex is emitted to the
/// trail. Emission order is the reverse of the final trail.
pub fn hierholzer_steps(graph: &Graph) -> Steps<Hierholzer> {
    let class = classify(graph);
    let stack = match class {
        EulerClass::Circuit { start } | EulerClass::Path { start, .. } => vec![start],
        EulerClass::Empty | EulerClass::NotEulerian => Vec::new(),
    };
    Steps::new(Hierholzer {
        remaining: graph.adjacency().to_lists(),
        directed: graph.is_directed(),
        edge_count: graph.edge_count(),
        class,
        stack,
        emitted: Vec::new(),
    })
}

/// Hierholzer state. One `advance` either consumes one edge from the top
/// vertex or emits the top vertex.
#[derive(Debug)]
pub struct Hierholzer {
    /// Unconsumed neighbor entries per vertex.
    remaining: Vec<Vec<VertexId>>,
    directed: bool,
    edge_count: usize,
    class: EulerClass,
    stack: Vec<VertexId>,
    /// Trail in emission (reverse) order.
    emitted: Vec<VertexId>,
}

impl StepSource for Hierholzer {
    type Output = EulerOutcome;

    fn advance(&mut self, events: &mut VecDeque<Step>) -> bool {
        let Some(&u) = self.stack.last() else {
            return false;
        };

        match self.remaining[u.index()].pop() {
            Some(v) => {
                if !self.directed {
                    // Consume the mirrored entry, once
                    let back = &mut self.remaining[v.index()];
                    if let Some(at) = back.iter().position(|&w| w == u) {
                        back.remove(at);
                    }
                }
                self.stack.push(v);
                events.push_back(Step::EdgeTraversed(u, v));
            }
            None => {
                self.stack.pop();
                self.emitted.push(u);
                events.push_back(Step::VertexCommitted(u));
            }
        }
        true
    }

    fn into_output(mut self) -> EulerOutcome {
        let outcome = match self.class {
            EulerClass::Empty => EulerOutcome::Circuit(Vec::new()),
            EulerClass::NotEulerian => EulerOutcome::NotEulerian,
            _ if self.emitted.len() != self.edge_count + 1 => EulerOutcome::NotConnected,
            EulerClass::Circuit { .. } => {
                self.emitted.reverse();
                EulerOutcome::Circuit(self.emitted)
            }
            EulerClass::Path { .. } => {
                self.emitted.reverse();
                EulerOutcome::Path(self.emitted)
            }
        };
        tracing::debug!(
            class = ?self.class,
            trail_len = outcome.trail().map(<[VertexId]>::len),
            "hierholzer finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VertexId {
        VertexId::from_index(i)
    }

    fn ids(xs: &[usize]) -> Vec<VertexId> {
        xs.iter().map(|&i| v(i)).collect()
    }

    fn graph(n: usize, directed: bool, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new(directed, false);
        for _ in 0..n {
            g.add_vertex();
        }
        for &(a, b) in edges {
            g.add_edge(v(a), v(b)).unwrap();
        }
        g
    }

    #[test]
    fn four_cycle_circuit() {
        let g = graph(4, false, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert_eq!(classify(&g), EulerClass::Circuit { start: v(0) });
        assert_eq!(hierholzer(&g), EulerOutcome::Circuit(ids(&[0, 3, 2, 1, 0])));
    }

    #[test]
    fn two_odd_vertices_give_path() {
        // Triangle plus a tail: 2 and 3 are odd
        let g = graph(4, false, &[(0, 1), (1, 2), (2, 0), (2, 3)]);
        assert_eq!(classify(&g), EulerClass::Path { start: v(2), end: v(3) });
        let outcome = hierholzer(&g);
        let trail = outcome.trail().unwrap();
        assert!(matches!(outcome, EulerOutcome::Path(_)));
        assert_eq!(trail.len(), 5);
        assert_eq!(trail.first(), Some(&v(2)));
        assert_eq!(trail.last(), Some(&v(3)));
    }

    #[test]
    fn four_odd_vertices_not_eulerian() {
        let g = graph(4, false, &[(0, 1), (2, 3)]);
        assert_eq!(classify(&g), EulerClass::NotEulerian);
        assert_eq!(hierholzer(&g), EulerOutcome::NotEulerian);
    }

    #[test]
    fn even_degrees_split_across_components() {
        let g = graph(6, false, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
        assert_eq!(classify(&g), EulerClass::Circuit { start: v(0) });
        assert_eq!(hierholzer(&g), EulerOutcome::NotConnected);
    }

    #[test]
    fn directed_cycle_and_path() {
        let cycle = graph(3, true, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(hierholzer(&cycle), EulerOutcome::Circuit(ids(&[0, 1, 2, 0])));

        let path = graph(3, true, &[(1, 0), (0, 2)]);
        assert_eq!(classify(&path), EulerClass::Path { start: v(1), end: v(2) });
        assert_eq!(hierholzer(&path), EulerOutcome::Path(ids(&[1, 0, 2])));
    }

    #[test]
    fn directed_imbalance_not_eulerian() {
        // Vertex 0 has two more out-edges than in-edges
        let g = graph(3, true, &[(0, 1), (0, 2)]);
        assert_eq!(classify(&g), EulerClass::NotEulerian);

        // Two sources
        let g = graph(4, true, &[(0, 2), (1, 3)]);
        assert_eq!(classify(&g), EulerClass::NotEulerian);
    }

    #[test]
    fn one_way_edge_turns_circuit_into_path() {
        // Balanced except that 1 -> 2 is one-way
        let g = graph(3, true, &[(0, 1), (1, 0), (1, 2)]);
        assert_eq!(classify(&g), EulerClass::Path { start: v(1), end: v(2) });
    }

    #[test]
    fn empty_and_edgeless() {
        assert_eq!(classify(&Graph::default()), EulerClass::Empty);
        assert_eq!(hierholzer(&Graph::default()), EulerOutcome::Circuit(vec![]));

        let g = graph(2, false, &[]);
        assert_eq!(hierholzer(&g), EulerOutcome::Circuit(ids(&[0])));
    }

    #[test]
    fn step_events() {
        let g = graph(2, true, &[(0, 1), (1, 0)]);
        let steps: Vec<Step> = hierholzer_steps(&g).collect();
        assert_eq!(
            steps,
            vec![
                Step::EdgeTraversed(v(0), v(1)),
                Step::EdgeTraversed(v(1), v(0)),
                Step::VertexCommitted(v(0)),
                Step::VertexCommitted(v(1)),
                Step::VertexCommitted(v(0)),
            ]
        );
    }

    #[test]
    fn every_edge_used_once() {
        // Two triangles sharing vertex 0
        let g = graph(5, false, &[(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)]);
        let outcome = hierholzer(&g);
        let trail = outcome.trail().unwrap();
        assert_eq!(trail.len(), 7);
        let mut used: Vec<(VertexId, VertexId)> = trail
            .windows(2)
            .map(|w| (w[0].min(w[1]), w[0].max(w[1])))
            .collect();
        used.sort();
        used.dedup();
        assert_eq!(used.len(), 6);
    }
}
