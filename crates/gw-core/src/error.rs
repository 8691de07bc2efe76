use thiserror::Error;

pub type GwResult<T> = Result<T, GwError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GwError {
    #[error("Invalid vertex: {vertex} (graph has {count} vertices)")]
    InvalidVertex { vertex: usize, count: usize },

    #[error("Invalid operation: {what}")]
    InvalidOperation { what: &'static str },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
