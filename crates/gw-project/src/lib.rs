//! gw-project: persisted graph file format and validation.

pub mod schema;
pub mod validate;

use std::path::Path;

use gw_graph::GraphError;

pub use schema::{GraphFile, Position, parse_weight_key, weight_key};
pub use validate::{ValidationError, validate_file};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn checked(path: &Path, file: GraphFile) -> ProjectResult<GraphFile> {
    if let Err(err) = validate_file(&file) {
        tracing::warn!(path = %path.display(), error = %err, "rejected graph file");
        return Err(err.into());
    }
    tracing::debug!(
        path = %path.display(),
        vertices = file.vertices.len(),
        edges = file.edges.len(),
        "loaded graph file"
    );
    Ok(file)
}

pub fn load_yaml(path: &Path) -> ProjectResult<GraphFile> {
    let content = std::fs::read_to_string(path)?;
    let file: GraphFile = serde_yaml::from_str(&content)?;
    checked(path, file)
}

pub fn save_yaml(path: &Path, file: &GraphFile) -> ProjectResult<()> {
    validate_file(file)?;
    let content = serde_yaml::to_string(file)?;
    std::fs::write(path, content)?;
    tracing::debug!(path = %path.display(), "saved graph file");
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<GraphFile> {
    let content = std::fs::read_to_string(path)?;
    let file: GraphFile = serde_json::from_str(&content)?;
    checked(path, file)
}

pub fn save_json(path: &Path, file: &GraphFile) -> ProjectResult<()> {
    validate_file(file)?;
    let content = serde_json::to_string_pretty(file)?;
    std::fs::write(path, content)?;
    tracing::debug!(path = %path.display(), "saved graph file");
    Ok(())
}
