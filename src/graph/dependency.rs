// src/graph/dependency.rs

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::extract::FileRecord;
use crate::resolve::{Resolution, ResolvedEdge};

/// One file in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub path: String,
    /// Symbols this file owns, in its own define order. May be empty.
    pub defines: Vec<String>,
    /// `(dependency file, symbol that created the edge)`, one entry per file.
    pub requires: Vec<(String, String)>,
}

impl FileNode {
    /// Add or update the edge to `to`.
    ///
    /// A file keeps the position of its first edge to `to`; a later symbol
    /// resolving to the same file replaces the recorded symbol.
    fn add_edge(&mut self, to: &str, symbol: &str) {
        match self.requires.iter_mut().find(|(dep, _)| dep == to) {
            Some((_, via)) => *via = symbol.to_string(),
            None => self.requires.push((to.to_string(), symbol.to_string())),
        }
    }

    /// Whether this node has an edge to `path`.
    pub fn depends_on(&self, path: &str) -> bool {
        self.requires.iter().any(|(dep, _)| dep == path)
    }

    /// Dependency file paths.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.requires.iter().map(|(dep, _)| dep.as_str())
    }

    /// Symbols whose resolution created this node's edges.
    pub fn required_symbols(&self) -> impl Iterator<Item = &str> {
        self.requires.iter().map(|(_, symbol)| symbol.as_str())
    }

    /// True if the file owns no symbols.
    pub fn defines_nothing(&self) -> bool {
        self.defines.is_empty()
    }
}

/// File path -> defines + edges, in input order.
///
/// Every edge target is itself a node of the graph; unresolved symbols never
/// show up here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: Vec<FileNode>,
}

impl DependencyGraph {
    /// Combine extracted records with their resolution.
    ///
    /// `records` must already be limited to files that exist.
    pub fn build(records: &[FileRecord], resolution: &Resolution) -> Self {
        let mut edges_by_file: HashMap<&str, Vec<&ResolvedEdge>> = HashMap::new();
        for edge in &resolution.edges {
            edges_by_file.entry(edge.from.as_str()).or_default().push(edge);
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut nodes = Vec::with_capacity(records.len());

        for record in records {
            if !seen.insert(record.path.as_str()) {
                warn!(path = %record.path, "duplicate input file ignored");
                continue;
            }

            let defines: Vec<String> = record
                .defines
                .iter()
                .filter(|symbol| resolution.table.owns(&record.path, symbol))
                .cloned()
                .collect();

            let mut node = FileNode {
                path: record.path.clone(),
                defines,
                requires: Vec::new(),
            };
            for edge in edges_by_file.get(record.path.as_str()).into_iter().flatten() {
                node.add_edge(&edge.to, &edge.symbol);
            }

            debug!(
                path = %node.path,
                defines = ?node.defines,
                requires = ?node.requires,
                "graph node"
            );
            nodes.push(node);
        }

        Self { nodes }
    }

    /// Build directly from nodes, keeping their order.
    pub fn from_nodes(nodes: Vec<FileNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[FileNode] {
        &self.nodes
    }

    pub fn node(&self, path: &str) -> Option<&FileNode> {
        self.nodes.iter().find(|n| n.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.node(path).is_some()
    }

    /// File paths in graph order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.path.as_str())
    }

    /// All `(from, to)` file edges.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .iter()
            .flat_map(|n| n.dependencies().map(move |dep| (n.path.as_str(), dep)))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop the nodes whose paths are in `paths`.
    pub fn remove_all(&mut self, paths: &HashSet<String>) {
        self.nodes.retain(|n| !paths.contains(&n.path));
    }
}
