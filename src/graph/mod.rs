// src/graph/mod.rs

//! Dependency graph construction, ordering and cycle diagnostics.
//!
//! - [`dependency`] builds the file graph from resolved symbols.
//! - [`sorter`] emits files layer by layer, dependencies first.
//! - [`pruner`] narrows a stuck set to the files that form cycles.
//! - [`dot`] renders a graph as Graphviz for cycle reports.

pub mod dependency;
pub mod dot;
pub mod pruner;
pub mod sorter;

pub use dependency::{DependencyGraph, FileNode};
pub use dot::{render_dot, write_dot, NO_DEFINES};
pub use pruner::prune_to_cycles;
pub use sorter::{sort, SortOutcome, StuckSet};
