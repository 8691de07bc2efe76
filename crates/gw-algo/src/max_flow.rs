//! Maximum flow.
//!
//! Edmonds-Karp (BFS-augmenting Ford-Fulkerson) over a dense residual
//! capacity matrix built from the graph's edge weights.

use std::collections::VecDeque;

use gw_core::{GwError, GwResult, VertexId, Weight};
use gw_graph::Graph;

use crate::steps::{Step, StepSource, Steps};

/// One augmentation: the source-to-sink path and the flow pushed along it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    pub vertices: Vec<VertexId>,
    pub flow: Weight,
}

/// Maximum flow result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaxFlow {
    /// Maximum flow value.
    pub value: Weight,
    /// Augmenting paths in the order they were found.
    pub augmenting_paths: Vec<AugmentingPath>,
}

/// Maximum flow from `source` to `sink`.
///
/// Requires a directed, weighted graph; weights are capacities.
pub fn max_flow(graph: &Graph, source: VertexId, sink: VertexId) -> GwResult<MaxFlow> {
    Ok(max_flow_steps(graph, source, sink)?.finish())
}

/// Maximum flow as a lazy step sequence: one `AugmentingPath` per
/// augmentation, then a single `FlowSettled` with the final value.
pub fn max_flow_steps(
    graph: &Graph,
    source: VertexId,
    sink: VertexId,
) -> GwResult<Steps<EdmondsKarp>> {
    if !graph.is_directed() || !graph.is_weighted() {
        return Err(GwError::InvalidOperation {
            what: "max flow requires a directed, weighted graph",
        });
    }
    graph.check_vertex(source)?;
    graph.check_vertex(sink)?;
    if source == sink {
        return Err(GwError::InvalidOperation {
            what: "source and sink must differ",
        });
    }

    // Capacity matrix
    let n = graph.vertex_count();
    let mut residual = vec![vec![0; n]; n];
    for &edge in graph.edges() {
        residual[edge.from.index()][edge.to.index()] = graph.effective_weight(edge);
    }

    Ok(Steps::new(EdmondsKarp {
        residual,
        source: source.index(),
        sink: sink.index(),
        result: MaxFlow::default(),
        settled: false,
    }))
}

/// Edmonds-Karp state. One `advance` finds and applies one augmenting path,
/// or settles the flow when none is left.
#[derive(Debug)]
pub struct EdmondsKarp {
    /// `residual[u][v]`: capacity still pushable from u to v.
    residual: Vec<Vec<Weight>>,
    source: usize,
    sink: usize,
    result: MaxFlow,
    settled: bool,
}

impl EdmondsKarp {
    /// BFS over positive residual capacity, scanning targets in index
    /// order. Returns the path source..=sink, or None if the sink is cut off.
    fn find_augmenting_path(&self) -> Option<Vec<usize>> {
        let n = self.residual.len();
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut queue = VecDeque::from([self.source]);
        visited[self.source] = true;

        while let Some(u) = queue.pop_front() {
            for v in 0..n {
                if visited[v] || self.residual[u][v] == 0 {
                    continue;
                }
                visited[v] = true;
                parent[v] = Some(u);
                if v == self.sink {
                    // Walk back to the source
                    let mut path = vec![v];
                    let mut current = v;
                    while let Some(prev) = parent[current] {
                        path.push(prev);
                        current = prev;
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(v);
            }
        }
        None
    }
}

impl StepSource for EdmondsKarp {
    type Output = MaxFlow;

    fn advance(&mut self, events: &mut VecDeque<Step>) -> bool {
        if self.settled {
            return false;
        }

        let Some(path) = self.find_augmenting_path() else {
            self.settled = true;
            events.push_back(Step::FlowSettled(self.result.value));
            return true;
        };

        // Bottleneck along the path
        let path_flow = path
            .windows(2)
            .map(|pair| self.residual[pair[0]][pair[1]])
            .min()
            .unwrap_or(0);

        // Residual update, creating return capacity on reverse edges
        for pair in path.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            self.residual[u][v] -= path_flow;
            self.residual[v][u] += path_flow;
        }
        self.result.value += path_flow;

        let vertices: Vec<VertexId> = path.into_iter().map(VertexId::from_index).collect();
        events.push_back(Step::AugmentingPath {
            vertices: vertices.clone(),
            flow: path_flow,
        });
        self.result.augmenting_paths.push(AugmentingPath {
            vertices,
            flow: path_flow,
        });
        true
    }

    fn into_output(self) -> MaxFlow {
        tracing::debug!(
            value = self.result.value,
            augmentations = self.result.augmenting_paths.len(),
            "max flow settled"
        );
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VertexId {
        VertexId::from_index(i)
    }

    fn network(n: usize, edges: &[(usize, usize, Weight)]) -> Graph {
        let mut g = Graph::new(true, true);
        for _ in 0..n {
            g.add_vertex();
        }
        for &(a, b, w) in edges {
            g.add_weighted_edge(v(a), v(b), w).unwrap();
        }
        g
    }

    #[test]
    fn diamond() {
        let g = network(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3)]);
        let result = max_flow(&g, v(0), v(3)).unwrap();
        assert_eq!(result.value, 4);
        assert_eq!(
            result.augmenting_paths,
            vec![
                AugmentingPath {
                    vertices: vec![v(0), v(1), v(3)],
                    flow: 2
                },
                AugmentingPath {
                    vertices: vec![v(0), v(2), v(3)],
                    flow: 2
                },
            ]
        );
    }

    #[test]
    fn classic_network() {
        //     10       10
        // S -----> A -----> T
        // |        ^        ^
        // |5       |5       |
        // v        |        |
        // B -----> C ------>|
        //     10       10
        let (s, a, b, c, t) = (0, 1, 2, 3, 4);
        let g = network(
            5,
            &[
                (s, a, 10),
                (s, b, 5),
                (a, t, 10),
                (b, c, 10),
                (c, a, 5),
                (c, t, 10),
            ],
        );
        assert_eq!(max_flow(&g, v(s), v(t)).unwrap().value, 15);
    }

    #[test]
    fn chain_bottleneck() {
        let g = network(3, &[(0, 1, 10), (1, 2, 5)]);
        assert_eq!(max_flow(&g, v(0), v(2)).unwrap().value, 5);
    }

    #[test]
    fn needs_reverse_capacity() {
        // The first path 0-1-2-3 blocks both others unless flow on 1->2 is undone
        let g = network(4, &[(0, 1, 1), (0, 2, 1), (1, 2, 1), (1, 3, 1), (2, 3, 1)]);
        let result = max_flow(&g, v(0), v(3)).unwrap();
        assert_eq!(result.value, 2);
    }

    #[test]
    fn unreachable_sink_is_zero() {
        let g = network(3, &[(1, 0, 4)]);
        let result = max_flow(&g, v(0), v(2)).unwrap();
        assert_eq!(result, MaxFlow::default());
    }

    #[test]
    fn zero_capacity_edges_carry_nothing() {
        let g = network(2, &[(0, 1, 0)]);
        assert_eq!(max_flow(&g, v(0), v(1)).unwrap().value, 0);
    }

    #[test]
    fn maximal_capacities_do_not_overflow() {
        let w = gw_core::MAX_WEIGHT;
        // Opposing edge 1 -> 0 grows to twice the bound once 0 -> 1 is saturated
        let g = network(3, &[(0, 1, w), (1, 0, w), (0, 2, w), (2, 1, w)]);
        let result = max_flow(&g, v(0), v(1)).unwrap();
        assert_eq!(result.value, 2 * w);
        assert_eq!(result.augmenting_paths.len(), 2);

        let mut g = network(2, &[(1, 0, 1)]);
        assert!(g.add_weighted_edge(v(0), v(1), u64::MAX).is_err());
        assert_eq!(max_flow(&g, v(0), v(1)).unwrap().value, 0);
    }

    #[test]
    fn mode_and_endpoint_checks() {
        let mut g = network(2, &[(0, 1, 1)]);
        assert!(matches!(
            max_flow(&g, v(0), v(0)),
            Err(GwError::InvalidOperation { .. })
        ));
        assert!(matches!(
            max_flow(&g, v(0), v(2)),
            Err(GwError::InvalidVertex { vertex: 2, count: 2 })
        ));

        g.set_weighted(false);
        assert!(matches!(
            max_flow(&g, v(0), v(1)),
            Err(GwError::InvalidOperation { .. })
        ));

        let mut undirected = Graph::new(false, true);
        undirected.add_vertex();
        undirected.add_vertex();
        assert!(max_flow(&undirected, v(0), v(1)).is_err());
    }

    #[test]
    fn value_reported_once_after_convergence() {
        let g = network(4, &[(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3)]);
        let steps: Vec<Step> = max_flow_steps(&g, v(0), v(3)).unwrap().collect();
        let settled: Vec<&Step> = steps
            .iter()
            .filter(|s| matches!(s, Step::FlowSettled(_)))
            .collect();
        assert_eq!(settled, vec![&Step::FlowSettled(4)]);
        assert_eq!(steps.last(), Some(&Step::FlowSettled(4)));
        assert_eq!(steps.len(), 3);
    }
}
