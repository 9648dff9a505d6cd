// src/graph/pruner.rs

//! Narrow a stuck set down to the files that sit on cycles.
//!
//! A file nothing else in the set points at cannot be part of a cycle, so
//! it is dropped; dropping it may free others, so repeat until stable. What
//! is left is every file with an incoming reference from inside the set.
//! This is a heuristic: files that merely hang between two cycles survive
//! too, so the result is not a minimal cycle cover.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::graph::dependency::DependencyGraph;

/// Iteratively remove files with no incoming reference from the set.
pub fn prune_to_cycles(stuck: &DependencyGraph) -> DependencyGraph {
    let mut current = stuck.clone();

    loop {
        let counts = incoming_counts(&current);
        let unreferenced: HashSet<String> = counts
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(path, _)| path.to_string())
            .collect();

        if unreferenced.is_empty() {
            return current;
        }

        trace!(dropped = ?unreferenced, "pruned unreferenced files");
        current.remove_all(&unreferenced);
    }
}

/// Per file: how many edges from files in `graph` point at it.
///
/// Edges are located through the required symbol, looked up among the
/// symbols currently defined inside `graph`.
pub fn incoming_counts(graph: &DependencyGraph) -> HashMap<&str, usize> {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for node in graph.nodes() {
        counts.insert(node.path.as_str(), 0);
        for symbol in &node.defines {
            owners.insert(symbol.as_str(), node.path.as_str());
        }
    }

    for node in graph.nodes() {
        for symbol in node.required_symbols() {
            if let Some(owner) = owners.get(symbol) {
                if let Some(count) = counts.get_mut(owner) {
                    *count += 1;
                }
            }
        }
    }

    counts
}
