// src/graph/sorter.rs

//! Layered topological sort (Kahn's algorithm, one layer per pass).

use std::collections::HashSet;

use tracing::debug;

use crate::graph::dependency::DependencyGraph;
use crate::graph::pruner::prune_to_cycles;

/// Files left over when no further file could be emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StuckSet {
    /// Everything still unsorted, in graph order.
    pub remaining: DependencyGraph,
    /// `remaining` pruned down to the files that actually form cycles.
    pub cycle: DependencyGraph,
}

/// Result of [`sort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    /// Emitted files; every dependency precedes its dependents.
    pub order: Vec<String>,
    /// The same files grouped by the pass that emitted them.
    pub layers: Vec<Vec<String>>,
    /// `Some` if sorting stopped on a cycle.
    pub stuck: Option<StuckSet>,
}

impl SortOutcome {
    pub fn is_complete(&self) -> bool {
        self.stuck.is_none()
    }

    /// Lenient completion: append every stuck file in graph order.
    ///
    /// The appended tail does not respect its internal dependencies.
    pub fn force_complete(&mut self) {
        if let Some(stuck) = self.stuck.take() {
            let tail: Vec<String> = stuck.remaining.paths().map(str::to_string).collect();
            self.order.extend(tail.iter().cloned());
            self.layers.push(tail);
        }
    }
}

/// Sort `graph` so that every file comes after the files it requires.
///
/// Each pass collects all files whose dependencies have left the working
/// set, then removes them. If a pass finds nothing while files remain, the
/// rest is stuck on at least one cycle and is handed to the pruner.
pub fn sort(graph: &DependencyGraph) -> SortOutcome {
    let mut remaining = graph.clone();
    let mut order = Vec::with_capacity(graph.len());
    let mut layers = Vec::new();

    while !remaining.is_empty() {
        let ready: Vec<String> = {
            let present: HashSet<&str> = remaining.paths().collect();
            remaining
                .nodes()
                .iter()
                .filter(|node| node.dependencies().all(|dep| !present.contains(dep)))
                .map(|node| node.path.clone())
                .collect()
        };

        if ready.is_empty() {
            let cycle = prune_to_cycles(&remaining);
            debug!(
                remaining = remaining.len(),
                cycle = ?cycle.paths().collect::<Vec<_>>(),
                "no file can be ordered next"
            );
            return SortOutcome {
                order,
                layers,
                stuck: Some(StuckSet { remaining, cycle }),
            };
        }

        debug!(layer = layers.len(), files = ?ready, "layer ready");

        let emitted: HashSet<String> = ready.iter().cloned().collect();
        remaining.remove_all(&emitted);
        order.extend(ready.iter().cloned());
        layers.push(ready);
    }

    SortOutcome {
        order,
        layers,
        stuck: None,
    }
}
