use clap::{Parser, Subcommand, ValueEnum};
use gw_algo::{
    BipartiteOutcome, EulerClass, EulerOutcome, PathOutcome, SpanningTree, StepSource, Steps,
    Traversal,
};
use gw_core::{GwError, VertexId, Weight};
use gw_graph::{Graph, GraphError};
use gw_project::{GraphFile, Position, ProjectError};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Project(#[from] ProjectError),

    #[error("{0}")]
    Graph(#[from] GraphError),

    #[error("{0}")]
    Algorithm(#[from] GwError),

    #[error("{} already exists (pass --force to overwrite)", .path.display())]
    FileExists { path: PathBuf },

    #[error("Vertex index {0} is too large")]
    VertexIndex(usize),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "gw-cli")]
#[command(about = "GraphWork CLI - build graphs and run classical graph algorithms", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty graph file
    New {
        /// Graph file (.json, or .yaml/.yml)
        graph_path: PathBuf,
        #[arg(long)]
        directed: bool,
        #[arg(long)]
        weighted: bool,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Append a vertex at a canvas position
    AddVertex {
        graph_path: PathBuf,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        y: f64,
    },
    /// Add an edge; the weight is stored even while the graph is unweighted
    AddEdge {
        graph_path: PathBuf,
        from: usize,
        to: usize,
        #[arg(short, long)]
        weight: Option<Weight>,
    },
    /// Change the weight of an existing edge
    SetWeight {
        graph_path: PathBuf,
        from: usize,
        to: usize,
        weight: Weight,
    },
    /// Remove a vertex and renumber the vertices above it
    RemoveVertex { graph_path: PathBuf, vertex: usize },
    /// Remove an edge
    RemoveEdge {
        graph_path: PathBuf,
        from: usize,
        to: usize,
    },
    /// Toggle directed and weighted mode
    SetMode {
        graph_path: PathBuf,
        #[arg(long)]
        directed: Option<bool>,
        #[arg(long)]
        weighted: Option<bool>,
    },
    /// Remove every vertex and edge, keeping the mode
    Clear { graph_path: PathBuf },
    /// Print the graph as a matrix, adjacency list or edge list
    Show {
        graph_path: PathBuf,
        #[arg(value_enum, default_value_t = View::Edges)]
        view: View,
    },
    /// Breadth-first traversal
    Bfs {
        graph_path: PathBuf,
        start: usize,
        /// Print each step event
        #[arg(long)]
        trace: bool,
    },
    /// Depth-first traversal
    Dfs {
        graph_path: PathBuf,
        start: usize,
        #[arg(long)]
        trace: bool,
    },
    /// Shortest path by edge count
    Path {
        graph_path: PathBuf,
        source: usize,
        target: usize,
        #[arg(long)]
        trace: bool,
    },
    /// Edge-count distance between every pair of vertices
    Distances { graph_path: PathBuf },
    /// Two-color the graph
    Bipartite {
        graph_path: PathBuf,
        #[arg(long)]
        trace: bool,
    },
    /// Minimum spanning tree by Prim's algorithm
    Prim {
        graph_path: PathBuf,
        #[arg(long)]
        trace: bool,
    },
    /// Minimum spanning forest by Kruskal's algorithm
    Kruskal {
        graph_path: PathBuf,
        #[arg(long)]
        trace: bool,
    },
    /// Maximum flow (Edmonds-Karp)
    MaxFlow {
        graph_path: PathBuf,
        source: usize,
        sink: usize,
        #[arg(long)]
        trace: bool,
    },
    /// Classify the graph by the Eulerian degree criterion
    Euler { graph_path: PathBuf },
    /// Build an Eulerian circuit or path
    Hierholzer {
        graph_path: PathBuf,
        #[arg(long)]
        trace: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum View {
    Matrix,
    List,
    Edges,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    run(cli.command)
}

fn run(command: Commands) -> CliResult<()> {
    match command {
        Commands::New {
            graph_path,
            directed,
            weighted,
            force,
        } => cmd_new(&graph_path, directed, weighted, force),
        Commands::AddVertex { graph_path, x, y } => edit(&graph_path, |graph, positions| {
            let id = graph.add_vertex();
            positions.push((x, y));
            println!("Added vertex {}", id);
            Ok(())
        }),
        Commands::AddEdge {
            graph_path,
            from,
            to,
            weight,
        } => {
            let (from, to) = (vertex(from)?, vertex(to)?);
            edit(&graph_path, |graph, _| {
                match weight {
                    Some(w) => graph.add_weighted_edge(from, to, w)?,
                    None => graph.add_edge(from, to)?,
                }
                println!("Added edge {} -> {}", from, to);
                Ok(())
            })
        }
        Commands::SetWeight {
            graph_path,
            from,
            to,
            weight,
        } => {
            let (from, to) = (vertex(from)?, vertex(to)?);
            edit(&graph_path, |graph, _| {
                graph.set_weight(from, to, weight)?;
                println!("Edge {} -> {} now weighs {}", from, to, weight);
                Ok(())
            })
        }
        Commands::RemoveVertex { graph_path, vertex: v } => {
            let v = vertex(v)?;
            let mut file = load(&graph_path)?;
            file.remove_vertex(v)?;
            save(&graph_path, &file)?;
            println!("Removed vertex {}", v);
            Ok(())
        }
        Commands::RemoveEdge {
            graph_path,
            from,
            to,
        } => {
            let (from, to) = (vertex(from)?, vertex(to)?);
            edit(&graph_path, |graph, _| {
                graph.remove_edge(from, to)?;
                println!("Removed edge {} -> {}", from, to);
                Ok(())
            })
        }
        Commands::SetMode {
            graph_path,
            directed,
            weighted,
        } => edit(&graph_path, |graph, _| {
            if let Some(directed) = directed {
                graph.set_directed(directed)?;
            }
            if let Some(weighted) = weighted {
                graph.set_weighted(weighted);
            }
            println!(
                "Graph is {}, {}",
                if graph.is_directed() { "directed" } else { "undirected" },
                if graph.is_weighted() { "weighted" } else { "unweighted" }
            );
            Ok(())
        }),
        Commands::Clear { graph_path } => edit(&graph_path, |graph, positions| {
            graph.clear();
            positions.clear();
            println!("Cleared graph");
            Ok(())
        }),
        Commands::Show { graph_path, view } => cmd_show(&load_model(&graph_path)?.0, view),
        Commands::Bfs {
            graph_path,
            start,
            trace,
        } => {
            let graph = load_model(&graph_path)?.0;
            let traversal = drive(gw_algo::bfs_steps(&graph, vertex(start)?)?, trace);
            print_traversal("BFS", &traversal);
            Ok(())
        }
        Commands::Dfs {
            graph_path,
            start,
            trace,
        } => {
            let graph = load_model(&graph_path)?.0;
            let traversal = drive(gw_algo::dfs_steps(&graph, vertex(start)?)?, trace);
            print_traversal("DFS", &traversal);
            Ok(())
        }
        Commands::Path {
            graph_path,
            source,
            target,
            trace,
        } => {
            let graph = load_model(&graph_path)?.0;
            let (source, target) = (vertex(source)?, vertex(target)?);
            let steps = gw_algo::shortest_path_steps(&graph, source, target)?;
            match drive(steps, trace) {
                PathOutcome::Found(path) => {
                    println!("Distance: {}", path.distance);
                    println!("Path: {}", join(&path.vertices, " -> "));
                }
                PathOutcome::NoPath => println!("No path from {} to {}", source, target),
            }
            Ok(())
        }
        Commands::Distances { graph_path } => {
            let graph = load_model(&graph_path)?.0;
            for row in gw_algo::distance_matrix(&graph) {
                let cells: Vec<String> = row
                    .iter()
                    .map(|d| d.map_or_else(|| "-".to_string(), |d| d.to_string()))
                    .collect();
                println!("{}", cells.join("\t"));
            }
            Ok(())
        }
        Commands::Bipartite { graph_path, trace } => {
            let graph = load_model(&graph_path)?.0;
            match drive(gw_algo::bipartite_steps(&graph), trace) {
                BipartiteOutcome::Bipartite(partition) => {
                    println!("Bipartite");
                    println!("  Color 0: {}", join(&partition.left, " "));
                    println!("  Color 1: {}", join(&partition.right, " "));
                }
                BipartiteOutcome::NotBipartite { conflict: (u, v) } => {
                    println!("Not bipartite: edge {} - {} closes an odd cycle", u, v);
                }
            }
            Ok(())
        }
        Commands::Prim { graph_path, trace } => {
            let graph = load_model(&graph_path)?.0;
            let tree = drive(gw_algo::prim_steps(&graph)?, trace);
            print_tree("Prim", &tree, graph.vertex_count());
            Ok(())
        }
        Commands::Kruskal { graph_path, trace } => {
            let graph = load_model(&graph_path)?.0;
            let tree = drive(gw_algo::kruskal_steps(&graph)?, trace);
            print_tree("Kruskal", &tree, graph.vertex_count());
            Ok(())
        }
        Commands::MaxFlow {
            graph_path,
            source,
            sink,
            trace,
        } => {
            let graph = load_model(&graph_path)?.0;
            let steps = gw_algo::max_flow_steps(&graph, vertex(source)?, vertex(sink)?)?;
            let flow = drive(steps, trace);
            for path in &flow.augmenting_paths {
                println!("  {} (flow {})", join(&path.vertices, " -> "), path.flow);
            }
            println!("Max flow: {}", flow.value);
            Ok(())
        }
        Commands::Euler { graph_path } => {
            let graph = load_model(&graph_path)?.0;
            match gw_algo::classify(&graph) {
                EulerClass::Empty => println!("Graph is empty"),
                EulerClass::Circuit { start } => {
                    println!("Eulerian circuit possible, starting at {}", start)
                }
                EulerClass::Path { start, end } => {
                    println!("Eulerian path possible, from {} to {}", start, end)
                }
                EulerClass::NotEulerian => println!("No Eulerian path or circuit"),
            }
            Ok(())
        }
        Commands::Hierholzer { graph_path, trace } => {
            let graph = load_model(&graph_path)?.0;
            match drive(gw_algo::hierholzer_steps(&graph), trace) {
                EulerOutcome::Circuit(trail) => {
                    println!("Eulerian circuit: {}", join(&trail, " -> "))
                }
                EulerOutcome::Path(trail) => println!("Eulerian path: {}", join(&trail, " -> ")),
                EulerOutcome::NotEulerian => println!("No Eulerian path or circuit"),
                EulerOutcome::NotConnected => {
                    println!("Degrees allow a trail, but the edges are not connected")
                }
            }
            Ok(())
        }
    }
}

fn vertex(index: usize) -> CliResult<VertexId> {
    VertexId::try_from_index(index).ok_or(CliError::VertexIndex(index))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}

fn load(path: &Path) -> CliResult<GraphFile> {
    let file = if is_yaml(path) {
        gw_project::load_yaml(path)?
    } else {
        gw_project::load_json(path)?
    };
    Ok(file)
}

fn save(path: &Path, file: &GraphFile) -> CliResult<()> {
    if is_yaml(path) {
        gw_project::save_yaml(path, file)?;
    } else {
        gw_project::save_json(path, file)?;
    }
    Ok(())
}

fn load_model(path: &Path) -> CliResult<(Graph, Vec<Position>)> {
    Ok(load(path)?.to_model()?)
}

/// Load, apply `change`, and write back only if it succeeded.
fn edit<F>(path: &Path, change: F) -> CliResult<()>
where
    F: FnOnce(&mut Graph, &mut Vec<Position>) -> CliResult<()>,
{
    let (mut graph, mut positions) = load_model(path)?;
    change(&mut graph, &mut positions)?;
    save(path, &GraphFile::from_model(&graph, &positions)?)
}

fn cmd_new(path: &Path, directed: bool, weighted: bool, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::FileExists {
            path: path.to_path_buf(),
        });
    }
    let file = GraphFile {
        is_directed: directed,
        is_weighted: weighted,
        ..GraphFile::default()
    };
    save(path, &file)?;
    println!("Created {}", path.display());
    Ok(())
}

fn cmd_show(graph: &Graph, view: View) -> CliResult<()> {
    println!(
        "{} vertices, {} edges ({}, {})",
        graph.vertex_count(),
        graph.edge_count(),
        if graph.is_directed() { "directed" } else { "undirected" },
        if graph.is_weighted() { "weighted" } else { "unweighted" }
    );
    match view {
        View::Matrix => {
            for row in graph.adjacency_matrix() {
                let cells: Vec<String> = row
                    .iter()
                    .map(|cell| cell.map_or_else(|| "-".to_string(), |w| w.to_string()))
                    .collect();
                println!("{}", cells.join("\t"));
            }
        }
        View::List => {
            for (u, neighbors) in graph.weighted_adjacency_list().iter().enumerate() {
                let entries: Vec<String> = neighbors
                    .iter()
                    .map(|n| format!("{}(w={})", n.vertex, n.weight))
                    .collect();
                println!("{}: {}", u, entries.join(", "));
            }
        }
        View::Edges => {
            for (from, to, weight) in graph.edge_list() {
                println!("{} -> {} (w={})", from, to, weight);
            }
        }
    }
    Ok(())
}

/// Run an algorithm to completion, echoing its step events when tracing.
fn drive<S: StepSource>(mut steps: Steps<S>, trace: bool) -> S::Output {
    if trace {
        for step in steps.by_ref() {
            println!("  {}", step);
        }
    }
    steps.finish()
}

fn join(vertices: &[VertexId], sep: &str) -> String {
    vertices
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

fn print_traversal(name: &str, traversal: &Traversal) {
    println!("{} order: {}", name, join(&traversal.order, " "));
    for (parent, child) in traversal.tree_edges() {
        println!("  {} -> {}", parent, child);
    }
}

fn print_tree(name: &str, tree: &SpanningTree, vertex_count: usize) {
    println!("{} spanning tree:", name);
    for edge in &tree.edges {
        println!("  {} - {} (w={})", edge.from, edge.to, edge.weight);
    }
    println!("Total weight: {}", tree.total_weight);
    if !tree.spans(vertex_count) {
        println!("Graph is disconnected; the tree does not reach every vertex");
    }
}
