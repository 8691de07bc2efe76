//! gw-algo: graph algorithms over the gw-graph model.
//!
//! Every algorithm borrows the graph read-only and comes in two flavours:
//! a function returning the result directly, and a `*_steps` function
//! returning a lazy [`Steps`] iterator of [`Step`] events for a renderer to
//! animate. Draining the iterator (or calling [`Steps::finish`]) yields the
//! same result either way.
//!
//! # Example
//!
//! ```
//! use gw_algo::{Step, bfs_steps};
//! use gw_core::VertexId;
//! use gw_graph::Graph;
//!
//! let mut graph = Graph::default();
//! let a = graph.add_vertex();
//! let b = graph.add_vertex();
//! graph.add_edge(a, b).unwrap();
//!
//! let mut steps = bfs_steps(&graph, a).unwrap();
//! assert_eq!(steps.next(), Some(Step::VertexVisited(a)));
//! let traversal = steps.finish();
//! assert_eq!(traversal.order, vec![a, b]);
//! ```

pub mod bipartite;
pub mod disjoint_set;
pub mod eulerian;
pub mod max_flow;
pub mod shortest_path;
pub mod spanning_tree;
pub mod steps;
pub mod traversal;

pub use bipartite::{BipartiteOutcome, Bipartition, bipartite_steps, check_bipartite};
pub use disjoint_set::DisjointSet;
pub use eulerian::{EulerClass, EulerOutcome, classify, hierholzer, hierholzer_steps};
pub use max_flow::{AugmentingPath, MaxFlow, max_flow, max_flow_steps};
pub use shortest_path::{Path, PathOutcome, distance_matrix, shortest_path, shortest_path_steps};
pub use spanning_tree::{SpanningTree, TreeEdge, kruskal, kruskal_steps, prim, prim_steps};
pub use steps::{Step, StepSource, Steps};
pub use traversal::{Traversal, bfs, bfs_steps, dfs, dfs_steps};
