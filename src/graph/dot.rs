// src/graph/dot.rs

//! Graphviz export of a dependency graph, used for cycle diagnostics.
//!
//! Each file becomes a cluster holding one node per defined symbol. Edges
//! run from every symbol of the requiring file to the symbol it required,
//! and are only drawn when that symbol is a node of the exported graph. A
//! file that owns no symbols is shown with a single [`NO_DEFINES`] node.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use tracing::info;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::graph::dependency::DependencyGraph;

/// Node label for a file that owns no symbols.
pub const NO_DEFINES: &str = "---";

/// `Display` adapter rendering a graph as DOT.
pub struct DotGraph<'a>(pub &'a DependencyGraph);

impl fmt::Display for DotGraph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.0;
        let mut nodes: HashSet<&str> = HashSet::new();

        writeln!(f, "digraph dependency {{")?;
        writeln!(f, "\trankdir=LR;")?;

        for (i, node) in graph.nodes().iter().enumerate() {
            writeln!(f, "\tsubgraph cluster_{} {{", i + 1)?;
            writeln!(f, "\t\trankdir=TB;")?;
            for symbol in node_labels(&node.defines) {
                nodes.insert(symbol);
                writeln!(f, "\t\t{};", quoted(symbol))?;
            }
            writeln!(f, "\t\tlabel={}", quoted(&format!("File: {}", node.path)))?;
            writeln!(f, "\t}}")?;
        }

        for node in graph.nodes() {
            for symbol in node_labels(&node.defines) {
                for required in node.required_symbols() {
                    if nodes.contains(required) {
                        writeln!(f, "\t{} -> {};", quoted(symbol), quoted(required))?;
                    }
                }
            }
        }

        writeln!(f, "}}")
    }
}

fn node_labels(defines: &[String]) -> Vec<&str> {
    if defines.is_empty() {
        vec![NO_DEFINES]
    } else {
        defines.iter().map(String::as_str).collect()
    }
}

pub fn render_dot(graph: &DependencyGraph) -> String {
    DotGraph(graph).to_string()
}

/// Render `graph` and write it to `path`.
pub fn write_dot(fs: &dyn FileSystem, path: &Path, graph: &DependencyGraph) -> Result<()> {
    fs.write(path, render_dot(graph).as_bytes())?;
    info!(path = %path.display(), files = graph.len(), "exported dependency graph");
    Ok(())
}

fn quoted(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 2);
    out.push('"');
    for c in id.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
