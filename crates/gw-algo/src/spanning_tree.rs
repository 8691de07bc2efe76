//! Minimum spanning trees: Prim and Kruskal.
//!
//! Both apply to undirected graphs only. On a disconnected graph Kruskal
//! returns a spanning forest and Prim the tree of vertex 0's component.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use gw_core::{DEFAULT_WEIGHT, GwError, GwResult, VertexId, Weight};
use gw_graph::{Adjacency, Graph};

use crate::disjoint_set::DisjointSet;
use crate::steps::{Step, StepSource, Steps};

/// An admitted tree edge. `from` is the endpoint already in the tree (Prim)
/// or the stored edge's first endpoint (Kruskal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEdge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: Weight,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpanningTree {
    /// Edges in admission order.
    pub edges: Vec<TreeEdge>,
    pub total_weight: Weight,
}

impl SpanningTree {
    fn admit(&mut self, edge: TreeEdge, events: &mut VecDeque<Step>) {
        self.total_weight += edge.weight;
        self.edges.push(edge);
        events.push_back(Step::EdgeCommitted {
            from: edge.from,
            to: edge.to,
            weight: edge.weight,
        });
    }

    /// True if the edges connect all `vertex_count` vertices.
    pub fn spans(&self, vertex_count: usize) -> bool {
        self.edges.len() + 1 >= vertex_count
    }

    /// Endpoint pairs in admission order.
    pub fn pairs(&self) -> Vec<(VertexId, VertexId)> {
        self.edges.iter().map(|e| (e.from, e.to)).collect()
    }
}

fn require_undirected(graph: &Graph) -> GwResult<()> {
    if graph.is_directed() {
        return Err(GwError::InvalidOperation {
            what: "spanning trees require an undirected graph",
        });
    }
    Ok(())
}

/// Prim's algorithm grown from vertex 0.
pub fn prim(graph: &Graph) -> GwResult<SpanningTree> {
    Ok(prim_steps(graph)?.finish())
}

/// Prim as a lazy step sequence: `VertexCommitted` per admitted vertex and
/// `EdgeCommitted` per tree edge.
pub fn prim_steps(graph: &Graph) -> GwResult<Steps<Prim<'_>>> {
    require_undirected(graph)?;
    let mut heap = BinaryHeap::new();
    if !graph.is_empty() {
        heap.push(Reverse((0, VertexId::from_index(0), None)));
    }
    Ok(Steps::new(Prim {
        graph,
        adjacency: graph.adjacency(),
        in_tree: vec![false; graph.vertex_count()],
        heap,
        tree: SpanningTree::default(),
    }))
}

/// Kruskal's algorithm over all edges.
pub fn kruskal(graph: &Graph) -> GwResult<SpanningTree> {
    Ok(kruskal_steps(graph)?.finish())
}

/// Kruskal as a lazy step sequence: `EdgeTraversed` per edge considered and
/// `EdgeCommitted` per edge admitted.
pub fn kruskal_steps(graph: &Graph) -> GwResult<Steps<Kruskal>> {
    require_undirected(graph)?;
    let mut candidates: Vec<(Weight, VertexId, VertexId)> = graph
        .edges()
        .iter()
        .map(|&edge| (graph.effective_weight(edge), edge.from, edge.to))
        .collect();
    candidates.sort();
    Ok(Steps::new(Kruskal {
        candidates: candidates.into(),
        sets: DisjointSet::new(graph.vertex_count()),
        tree: SpanningTree::default(),
    }))
}

/// Heap entry: `(edge weight, vertex, tree vertex it hangs from)`.
type Candidate = Reverse<(Weight, VertexId, Option<VertexId>)>;

/// Prim state. Stale heap entries for vertices already in the tree are
/// skipped when popped rather than removed.
#[derive(Debug)]
pub struct Prim<'a> {
    graph: &'a Graph,
    adjacency: Adjacency,
    in_tree: Vec<bool>,
    heap: BinaryHeap<Candidate>,
    tree: SpanningTree,
}

impl StepSource for Prim<'_> {
    type Output = SpanningTree;

    fn advance(&mut self, events: &mut VecDeque<Step>) -> bool {
        let (weight, u, parent) = loop {
            match self.heap.pop() {
                None => return false,
                Some(Reverse((_, u, _))) if self.in_tree[u.index()] => continue,
                Some(Reverse(entry)) => break entry,
            }
        };

        self.in_tree[u.index()] = true;
        events.push_back(Step::VertexCommitted(u));
        if let Some(parent) = parent {
            self.tree.admit(
                TreeEdge {
                    from: parent,
                    to: u,
                    weight,
                },
                events,
            );
        }

        for &v in self.adjacency.neighbors(u) {
            if !self.in_tree[v.index()] {
                let w = self.graph.weight_of(u, v).unwrap_or(DEFAULT_WEIGHT);
                self.heap.push(Reverse((w, v, Some(u))));
            }
        }
        true
    }

    fn into_output(self) -> SpanningTree {
        tracing::debug!(
            edges = self.tree.edges.len(),
            total_weight = self.tree.total_weight,
            "prim finished"
        );
        self.tree
    }
}

/// Kruskal state. One `advance` considers one edge in `(weight, u, v)` order.
#[derive(Debug)]
pub struct Kruskal {
    candidates: VecDeque<(Weight, VertexId, VertexId)>,
    sets: DisjointSet,
    tree: SpanningTree,
}

impl StepSource for Kruskal {
    type Output = SpanningTree;

    fn advance(&mut self, events: &mut VecDeque<Step>) -> bool {
        let Some((weight, from, to)) = self.candidates.pop_front() else {
            return false;
        };
        events.push_back(Step::EdgeTraversed(from, to));
        if self.sets.union(from.index(), to.index()) {
            self.tree.admit(TreeEdge { from, to, weight }, events);
        }
        true
    }

    fn into_output(self) -> SpanningTree {
        tracing::debug!(
            edges = self.tree.edges.len(),
            total_weight = self.tree.total_weight,
            "kruskal finished"
        );
        self.tree
    }
}
