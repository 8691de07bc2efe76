use std::collections::BTreeMap;

use gw_core::VertexId;
use gw_graph::Graph;
use gw_project::{
    GraphFile, ProjectError, ValidationError, load_json, load_yaml, save_json, save_yaml,
};

fn v(i: usize) -> VertexId {
    VertexId::from_index(i)
}

fn sample_model() -> (Graph, Vec<(f64, f64)>) {
    let mut graph = Graph::new(true, true);
    let positions = vec![(100.0, 120.0), (240.0, 80.0), (260.0, 300.0), (90.0, 310.5)];
    for _ in &positions {
        graph.add_vertex();
    }
    graph.add_weighted_edge(v(0), v(1), 3).unwrap();
    graph.add_weighted_edge(v(0), v(2), 2).unwrap();
    graph.add_weighted_edge(v(1), v(3), 2).unwrap();
    graph.add_edge(v(2), v(3)).unwrap();
    (graph, positions)
}

#[test]
fn roundtrip_json_reproduces_model() {
    let (graph, positions) = sample_model();
    let file = GraphFile::from_model(&graph, &positions).unwrap();

    let path = std::env::temp_dir().join("gw_project_roundtrip.json");
    save_json(&path, &file).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(loaded, file);

    let (reloaded, reloaded_positions) = loaded.to_model().unwrap();
    assert_eq!(reloaded, graph);
    assert_eq!(reloaded_positions, positions);
}

#[test]
fn roundtrip_yaml_reproduces_model() {
    let (graph, positions) = sample_model();
    let file = GraphFile::from_model(&graph, &positions).unwrap();

    let path = std::env::temp_dir().join("gw_project_roundtrip.yaml");
    save_yaml(&path, &file).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(loaded, file);
    assert_eq!(loaded.to_model().unwrap().0, graph);
}

#[test]
fn loaded_graph_runs_algorithms() {
    let (graph, positions) = sample_model();
    let file = GraphFile::from_model(&graph, &positions).unwrap();
    let (model, _) = file.to_model().unwrap();

    // 2 -> 3 has no stored weight, so it carries capacity 1
    let flow = gw_algo::max_flow(&model, v(0), v(3)).unwrap();
    assert_eq!(flow.value, 3);
}

#[test]
fn optional_fields_default() {
    let path = std::env::temp_dir().join("gw_project_minimal.json");
    std::fs::write(&path, r#"{ "vertices": [[0, 0], [10, 5]], "edges": [[1, 0]] }"#).unwrap();

    let file = load_json(&path).unwrap();
    assert!(file.weights.is_empty());
    assert!(!file.is_directed);
    assert!(!file.is_weighted);

    let (graph, positions) = file.to_model().unwrap();
    assert_eq!(positions, vec![(0.0, 0.0), (10.0, 5.0)]);
    assert!(graph.contains_edge(v(0), v(1)));
}

#[test]
fn missing_edges_key_is_load_error() {
    let path = std::env::temp_dir().join("gw_project_missing_edges.json");
    std::fs::write(&path, r#"{ "vertices": [[0, 0]] }"#).unwrap();
    assert!(matches!(load_json(&path), Err(ProjectError::Json(_))));

    let path = std::env::temp_dir().join("gw_project_missing_vertices.yaml");
    std::fs::write(&path, "edges: []\n").unwrap();
    assert!(matches!(load_yaml(&path), Err(ProjectError::Yaml(_))));
}

#[test]
fn invalid_file_is_rejected_on_load() {
    let path = std::env::temp_dir().join("gw_project_bad_weight.json");
    std::fs::write(
        &path,
        r#"{ "vertices": [[0, 0], [1, 1]], "edges": [[0, 1]], "weights": { "1,0": 4 } }"#,
    )
    .unwrap();
    assert!(matches!(
        load_json(&path),
        Err(ProjectError::Validation(ValidationError::UnknownWeightEdge { .. }))
    ));
}

#[test]
fn repeated_weight_key_is_rejected_on_load() {
    let path = std::env::temp_dir().join("gw_project_repeated_key.json");
    std::fs::write(
        &path,
        r#"{ "vertices": [[0, 0], [1, 1]], "edges": [[0, 1]], "weights": { "0,1": 4, " 0,1": 9 } }"#,
    )
    .unwrap();
    assert!(matches!(
        load_json(&path),
        Err(ProjectError::Validation(ValidationError::DuplicateWeightKey { .. }))
    ));
}

#[test]
fn oversized_weight_is_rejected_on_load() {
    let path = std::env::temp_dir().join("gw_project_oversized_weight.yaml");
    std::fs::write(
        &path,
        "vertices: [[0.0, 0.0], [1.0, 1.0]]\nedges: [[0, 1]]\nweights: { \"0,1\": 18446744073709551615 }\nis_directed: true\nis_weighted: true\n",
    )
    .unwrap();
    assert!(matches!(
        load_yaml(&path),
        Err(ProjectError::Validation(ValidationError::WeightOutOfRange { .. }))
    ));
}

#[test]
fn invalid_file_is_not_written() {
    let file = GraphFile {
        vertices: vec![(0.0, 0.0)],
        edges: vec![(0, 0)],
        weights: BTreeMap::new(),
        is_directed: false,
        is_weighted: false,
    };
    let path = std::env::temp_dir().join("gw_project_never_written.json");
    let _ = std::fs::remove_file(&path);
    assert!(save_json(&path, &file).is_err());
    assert!(!path.exists());
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("gw_project_does_not_exist.json");
    let _ = std::fs::remove_file(&path);
    assert!(matches!(load_json(&path), Err(ProjectError::Io(_))));
}
