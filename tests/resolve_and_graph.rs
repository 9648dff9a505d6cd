mod common;
use crate::common::init_tracing;

use filedeps::config::Options;
use filedeps::extract::FileRecord;
use filedeps::graph::DependencyGraph;
use filedeps::resolve::{resolve, SymbolTable};

fn record(path: &str, defines: &[&str], requires: &[&str]) -> FileRecord {
    FileRecord {
        path: path.to_string(),
        content: String::new(),
        defines: defines.iter().map(|s| s.to_string()).collect(),
        requires: requires.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn last_definition_wins() {
    init_tracing();

    let records = vec![
        record("first.js", &["shared"], &[]),
        record("second.js", &["shared"], &[]),
        record("user.js", &[], &["shared"]),
    ];
    let resolution = resolve(&records, &Options::new("t"));

    assert_eq!(resolution.table.owner_of("shared"), Some("second.js"));
    assert_eq!(resolution.edges.len(), 1);
    assert_eq!(resolution.edges[0].from, "user.js");
    assert_eq!(resolution.edges[0].to, "second.js");
    assert_eq!(resolution.edges[0].symbol, "shared");

    let graph = DependencyGraph::build(&records, &resolution);
    let user = graph.node("user.js").unwrap();
    assert_eq!(user.requires, vec![("second.js".to_string(), "shared".to_string())]);

    // The shadowed define no longer belongs to the earlier file.
    assert!(graph.node("first.js").unwrap().defines.is_empty());
    assert_eq!(graph.node("second.js").unwrap().defines, vec!["shared"]);
}

#[test]
fn unresolved_symbols_are_collected_not_linked() {
    init_tracing();

    let records = vec![
        record("a.js", &["a"], &["missing", "a2"]),
        record("b.js", &["b"], &["missing"]),
    ];
    let resolution = resolve(&records, &Options::new("t"));

    assert!(resolution.edges.is_empty());
    assert_eq!(
        resolution.unresolved.required_by("missing").unwrap(),
        &["a.js".to_string(), "b.js".to_string()]
    );
    assert_eq!(
        resolution.unresolved.required_by("a2").unwrap(),
        &["a.js".to_string()]
    );
    let order: Vec<&str> = resolution.unresolved.iter().map(|(s, _)| s).collect();
    assert_eq!(order, vec!["missing", "a2"]);

    let graph = DependencyGraph::build(&records, &resolution);
    assert_eq!(graph.edges().count(), 0);
}

#[test]
fn self_requirement_follows_skip_flag() {
    init_tracing();

    let records = vec![record("self.js", &["me"], &["me"])];

    let mut options = Options::new("t");
    options.skip_required_myself = false;
    let kept = DependencyGraph::build(&records, &resolve(&records, &options));
    assert!(kept.node("self.js").unwrap().depends_on("self.js"));

    options.skip_required_myself = true;
    let skipped = DependencyGraph::build(&records, &resolve(&records, &options));
    assert!(skipped.node("self.js").unwrap().requires.is_empty());
}

#[test]
fn one_edge_per_dependency_file_recording_the_last_symbol() {
    let records = vec![
        record("lib.js", &["lib/a", "lib/b"], &[]),
        record("other.js", &["other"], &[]),
        record("app.js", &["app"], &["lib/a", "other", "lib/b"]),
    ];
    let resolution = resolve(&records, &Options::new("t"));
    let graph = DependencyGraph::build(&records, &resolution);

    let app = graph.node("app.js").unwrap();
    assert_eq!(
        app.requires,
        vec![
            ("lib.js".to_string(), "lib/b".to_string()),
            ("other.js".to_string(), "other".to_string()),
        ]
    );
}

#[test]
fn graph_keeps_input_order_and_placeholder_defines() {
    let records = vec![
        record("z.js", &[], &[]),
        record("a.js", &["a"], &[]),
        record("m.js", &["m1", "m2"], &["a"]),
    ];
    let graph = DependencyGraph::build(&records, &resolve(&records, &Options::new("t")));

    let paths: Vec<&str> = graph.paths().collect();
    assert_eq!(paths, vec!["z.js", "a.js", "m.js"]);
    assert!(graph.node("z.js").unwrap().defines_nothing());
    assert_eq!(graph.node("m.js").unwrap().defines, vec!["m1", "m2"]);

    let edges: Vec<(&str, &str)> = graph.edges().collect();
    assert_eq!(edges, vec![("m.js", "a.js")]);
}

#[test]
fn empty_input_gives_empty_table_and_graph() {
    let table = SymbolTable::from_records(&[]);
    assert!(table.is_empty());

    let graph = DependencyGraph::build(&[], &resolve(&[], &Options::new("t")));
    assert!(graph.is_empty());
}
