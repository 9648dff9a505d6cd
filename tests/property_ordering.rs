use std::collections::{HashMap, HashSet};

use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graphmap::DiGraphMap;
use proptest::prelude::*;

use filedeps::config::Options;
use filedeps::extract::FileRecord;
use filedeps::graph::{sort, DependencyGraph};
use filedeps::resolve::resolve;

// Strategy for acyclic inputs: file i may only require symbols of files 0..i.
// Files are then shuffled so input order says nothing about dependencies.
fn acyclic_records(max_files: usize) -> impl Strategy<Value = Vec<FileRecord>> {
    (1..=max_files)
        .prop_flat_map(|n| {
            (
                proptest::collection::vec(proptest::collection::vec(any::<usize>(), 0..4), n),
                Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
            )
        })
        .prop_map(|(raw_deps, permutation)| {
            let records: Vec<FileRecord> = raw_deps
                .into_iter()
                .enumerate()
                .map(|(i, potential)| {
                    let mut requires: Vec<String> = Vec::new();
                    if i > 0 {
                        for d in potential {
                            let name = format!("sym{}", d % i);
                            if !requires.contains(&name) {
                                requires.push(name);
                            }
                        }
                    }
                    // Occasionally require something nobody defines.
                    if i % 3 == 2 {
                        requires.push("external".to_string());
                    }
                    FileRecord {
                        path: format!("file{i}.js"),
                        content: String::new(),
                        defines: vec![format!("sym{i}")],
                        requires,
                    }
                })
                .collect();
            permutation.iter().map(|&i| records[i].clone()).collect()
        })
}

fn oracle(graph: &DependencyGraph) -> DiGraphMap<&str, ()> {
    let mut g: DiGraphMap<&str, ()> = DiGraphMap::new();
    for path in graph.paths() {
        g.add_node(path);
    }
    for (from, to) in graph.edges() {
        g.add_edge(to, from, ());
    }
    g
}

proptest! {
    #[test]
    fn every_dependency_precedes_its_dependent(records in acyclic_records(12)) {
        let graph = DependencyGraph::build(&records, &resolve(&records, &Options::new("p")));
        let g = oracle(&graph);
        prop_assert!(!is_cyclic_directed(&g));
        prop_assert!(toposort(&g, None).is_ok());

        let outcome = sort(&graph);
        prop_assert!(outcome.is_complete());

        let position: HashMap<&str, usize> = outcome
            .order
            .iter()
            .enumerate()
            .map(|(i, p)| (p.as_str(), i))
            .collect();
        for (from, to) in graph.edges() {
            prop_assert!(position[to] < position[from], "{to} must precede {from}");
        }

        // A permutation of the input, nothing lost or repeated.
        let unique: HashSet<&str> = outcome.order.iter().map(|s| s.as_str()).collect();
        prop_assert_eq!(unique.len(), records.len());
        prop_assert_eq!(outcome.order.len(), records.len());
    }

    #[test]
    fn layers_are_stable_across_runs(records in acyclic_records(10)) {
        let graph = DependencyGraph::build(&records, &resolve(&records, &Options::new("p")));
        let first = sort(&graph);
        let second = sort(&graph);
        prop_assert_eq!(first.layers, second.layers);
    }

    #[test]
    fn unresolved_requirements_never_become_edges(records in acyclic_records(8)) {
        let resolution = resolve(&records, &Options::new("p"));
        let graph = DependencyGraph::build(&records, &resolution);
        for node in graph.nodes() {
            prop_assert!(node.required_symbols().all(|s| s != "external"));
        }
        let expected = records.iter().any(|r| r.requires.iter().any(|s| s == "external"));
        prop_assert_eq!(resolution.unresolved.contains("external"), expected);
    }
}
