//! gw-core: shared foundation for graphwork.
//!
//! Contains:
//! - ids (compact vertex identities and the weight type)
//! - error (shared error type for algorithm entry points)

pub mod error;
pub mod ids;

// Re-exports: nice ergonomics for downstream crates
pub use error::{GwError, GwResult};
pub use ids::*;
