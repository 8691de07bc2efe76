//! Bipartiteness test by BFS two-coloring.

use std::collections::VecDeque;

use gw_core::VertexId;
use gw_graph::{Adjacency, Graph};

use crate::steps::{Step, StepSource, Steps};

/// The two color classes of a bipartite graph, each in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bipartition {
    /// Color 0 (every component root lands here).
    pub left: Vec<VertexId>,
    /// Color 1.
    pub right: Vec<VertexId>,
}

impl Bipartition {
    /// 0 or 1, or None if `v` is in neither class.
    pub fn color_of(&self, v: VertexId) -> Option<u8> {
        if self.left.binary_search(&v).is_ok() {
            Some(0)
        } else if self.right.binary_search(&v).is_ok() {
            Some(1)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BipartiteOutcome {
    Bipartite(Bipartition),
    /// `conflict` is the first edge found joining two same-colored vertices.
    NotBipartite { conflict: (VertexId, VertexId) },
}

impl BipartiteOutcome {
    pub fn is_bipartite(&self) -> bool {
        matches!(self, BipartiteOutcome::Bipartite(_))
    }
}

/// Two-color the whole graph, component by component.
///
/// Edge direction is ignored: bipartiteness is a property of the
/// underlying undirected graph.
pub fn check_bipartite(graph: &Graph) -> BipartiteOutcome {
    bipartite_steps(graph).finish()
}

/// Two-coloring as a lazy step sequence of `VertexColored` events.
pub fn bipartite_steps(graph: &Graph) -> Steps<TwoColoring> {
    let adjacency = Adjacency::symmetric(graph);
    let n = adjacency.vertex_count();
    Steps::new(TwoColoring {
        adjacency,
        color: vec![None; n],
        queue: VecDeque::new(),
        next_root: 0,
        conflict: None,
    })
}

/// Two-coloring state. One `advance` colors a new component root or
/// expands one queued vertex.
#[derive(Debug)]
pub struct TwoColoring {
    adjacency: Adjacency,
    color: Vec<Option<u8>>,
    queue: VecDeque<VertexId>,
    /// Lowest index that may still be uncolored.
    next_root: usize,
    conflict: Option<(VertexId, VertexId)>,
}

impl StepSource for TwoColoring {
    type Output = BipartiteOutcome;

    fn advance(&mut self, events: &mut VecDeque<Step>) -> bool {
        if self.conflict.is_some() {
            return false;
        }

        if let Some(u) = self.queue.pop_front() {
            let Some(cu) = self.color[u.index()] else {
                return true;
            };
            for &v in self.adjacency.neighbors(u) {
                match self.color[v.index()] {
                    None => {
                        self.color[v.index()] = Some(1 - cu);
                        self.queue.push_back(v);
                        events.push_back(Step::VertexColored {
                            vertex: v,
                            color: 1 - cu,
                        });
                    }
                    Some(cv) if cv == cu => {
                        self.conflict = Some((u, v));
                        return true;
                    }
                    Some(_) => {}
                }
            }
            return true;
        }

        // Queue drained: start the next component
        let n = self.color.len();
        while self.next_root < n && self.color[self.next_root].is_some() {
            self.next_root += 1;
        }
        if self.next_root == n {
            return false;
        }
        let root = VertexId::from_index(self.next_root);
        self.color[self.next_root] = Some(0);
        self.queue.push_back(root);
        events.push_back(Step::VertexColored {
            vertex: root,
            color: 0,
        });
        true
    }

    fn into_output(self) -> BipartiteOutcome {
        if let Some(conflict) = self.conflict {
            tracing::debug!(u = %conflict.0, v = %conflict.1, "odd cycle found");
            return BipartiteOutcome::NotBipartite { conflict };
        }
        let mut partition = Bipartition::default();
        for (i, c) in self.color.iter().enumerate() {
            match c {
                Some(0) => partition.left.push(VertexId::from_index(i)),
                Some(_) => partition.right.push(VertexId::from_index(i)),
                None => {}
            }
        }
        tracing::debug!(
            left = partition.left.len(),
            right = partition.right.len(),
            "graph is bipartite"
        );
        BipartiteOutcome::Bipartite(partition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VertexId {
        VertexId::from_index(i)
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
    fn even_cycle_is_bipartite() {
        let g = graph(4, false, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let outcome = check_bipartite(&g);
        assert_eq!(
            outcome,
            BipartiteOutcome::Bipartite(Bipartition {
                left: vec![v(0), v(2)],
                right: vec![v(1), v(3)],
            })
        );
    }

    #[test]
    fn chord_makes_odd_cycle() {
        let g = graph(4, false, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
        let outcome = check_bipartite(&g);
        assert_eq!(
            outcome,
            BipartiteOutcome::NotBipartite {
                conflict: (v(1), v(2))
            }
        );
    }

    #[test]
    fn components_colored_independently() {
        // Second component's root (3) restarts at color 0
        let g = graph(5, false, &[(0, 1), (4, 3), (1, 2)]);
        let BipartiteOutcome::Bipartite(p) = check_bipartite(&g) else {
            panic!("expected bipartite");
        };
        assert_eq!(p.left, vec![v(0), v(2), v(3)]);
        assert_eq!(p.right, vec![v(1), v(4)]);
        assert_eq!(p.color_of(v(4)), Some(1));
    }

    #[test]
    fn odd_cycle_in_later_component() {
        let g = graph(5, false, &[(0, 1), (2, 3), (3, 4), (4, 2)]);
        assert!(!check_bipartite(&g).is_bipartite());
    }

    #[test]
    fn directed_edges_checked_as_undirected() {
        // Edge 1 -> 0 is only seen from 0 through the symmetric view
        let g = graph(3, true, &[(1, 0), (1, 2)]);
        assert!(check_bipartite(&g).is_bipartite());

        let triangle = graph(3, true, &[(0, 1), (1, 2), (2, 0)]);
        assert!(!check_bipartite(&triangle).is_bipartite());
    }

    #[test]
    fn empty_and_edgeless() {
        assert_eq!(
            check_bipartite(&Graph::default()),
            BipartiteOutcome::Bipartite(Bipartition::default())
        );
        let g = graph(3, false, &[]);
        let BipartiteOutcome::Bipartite(p) = check_bipartite(&g) else {
            panic!("expected bipartite");
        };
        assert_eq!(p.left.len(), 3);
        assert!(p.right.is_empty());
    }

    #[test]
    fn color_events() {
        let g = graph(3, false, &[(0, 1), (1, 2)]);
        let steps: Vec<Step> = bipartite_steps(&g).collect();
        assert_eq!(
            steps,
            vec![
                Step::VertexColored {
                    vertex: v(0),
                    color: 0
                },
                Step::VertexColored {
                    vertex: v(1),
                    color: 1
                },
                Step::VertexColored {
                    vertex: v(2),
                    color: 0
                },
            ]
        );
    }
}
