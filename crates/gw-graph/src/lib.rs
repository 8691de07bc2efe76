//! gw-graph: graph model layer for graphwork.
//!
//! Provides:
//! - The mutable graph model (vertices, edges, weights, mode flags)
//! - A compact adjacency view built in edge insertion order
//! - Matrix / list / edge-list representations for display
//!
//! # Example
//!
//! ```
//! use gw_graph::Graph;
//!
//! let mut graph = Graph::new(false, true);
//! let a = graph.add_vertex();
//! let b = graph.add_vertex();
//! graph.add_weighted_edge(a, b, 7).unwrap();
//!
//! assert_eq!(graph.vertex_count(), 2);
//! assert_eq!(graph.weight_of(b, a), Some(7));
//! assert_eq!(graph.adjacency().neighbors(b), &[a]);
//! ```

pub mod adjacency;
pub mod error;
pub mod graph;
pub mod repr;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use adjacency::Adjacency;
pub use error::GraphError;
pub use graph::{Edge, Graph};
pub use repr::WeightedNeighbor;
