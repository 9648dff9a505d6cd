mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::path::{Path, PathBuf};

use filedeps::extract::Extractor;
use filedeps::fs::FileSystem;
use filedeps::output::{effective_destination, render_not_found_report, PropertyStore};
use filedeps::pipeline::Pipeline;
use filedeps::resolve::UnresolvedRequirements;
use filedeps::sources::{expand_sources, load_records};
use filedeps_test_utils::builders::{ConfigFileBuilder, SourceTreeBuilder, TargetConfigBuilder};

type TestResult = Result<(), Box<dyn Error>>;

fn patterns(p: &[&str]) -> Vec<String> {
    p.iter().map(|s| s.to_string()).collect()
}

#[test]
fn globs_expand_sorted_per_pattern_without_repeats() -> TestResult {
    init_tracing();

    let fs = SourceTreeBuilder::new()
        .file("js/vendor/z.js", "")
        .file("js/b.js", "")
        .file("js/a.js", "")
        .file("js/sub/c.js", "")
        .file("css/site.css", "")
        .build();

    let found = expand_sources(
        &fs,
        Path::new("."),
        &patterns(&["js/vendor/*.js", "js/**/*.js"]),
    )?;
    assert_eq!(found, vec!["js/vendor/z.js", "js/a.js", "js/b.js", "js/sub/c.js"]);
    Ok(())
}

#[test]
fn negated_patterns_remove_earlier_matches() -> TestResult {
    let fs = SourceTreeBuilder::new()
        .file("src/a.js", "")
        .file("src/a.test.js", "")
        .file("src/b.js", "")
        .build();

    let found = expand_sources(&fs, Path::new("."), &patterns(&["src/*.js", "!src/*.test.js"]))?;
    assert_eq!(found, vec!["src/a.js", "src/b.js"]);
    Ok(())
}

#[test]
fn dot_slash_prefix_is_ignored_in_globs_and_negations() -> TestResult {
    let fs = SourceTreeBuilder::new()
        .file("js/a.js", "")
        .file("js/b.js", "")
        .file("js/a.test.js", "")
        .build();

    let found = expand_sources(
        &fs,
        Path::new("."),
        &patterns(&["./js/*.js", "!./js/*.test.js"]),
    )?;
    assert_eq!(found, vec!["js/a.js", "js/b.js"]);
    Ok(())
}

#[test]
fn literal_paths_survive_until_loading() -> TestResult {
    init_tracing();

    let fs = SourceTreeBuilder::new().file("real.js", "define('r')").build();

    let found = expand_sources(&fs, Path::new("."), &patterns(&["./real.js", "ghost.js"]))?;
    assert_eq!(found, vec!["real.js", "ghost.js"]);

    let (records, missing) = load_records(&fs, Path::new("."), &found)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path, "real.js");
    assert_eq!(records[0].content, "define('r')");
    assert_eq!(missing, vec!["ghost.js"]);
    Ok(())
}

#[test]
fn not_found_report_lists_symbol_then_requesters() {
    let mut unresolved = UnresolvedRequirements::default();
    unresolved.record("missing", "a.js");
    unresolved.record("other", "b.js");
    unresolved.record("missing", "c.js");
    unresolved.record("missing", "a.js");
    unresolved.record("odd,name", "d \"quoted\".js");

    assert_eq!(
        render_not_found_report(&unresolved),
        "missing,a.js,c.js\nother,b.js\n\"odd,name\",\"d \"\"quoted\"\".js\"\n"
    );
}

#[test]
fn destination_sentinels_mean_no_output() {
    assert_eq!(effective_destination(None), None);
    assert_eq!(effective_destination(Some("")), None);
    assert_eq!(effective_destination(Some("src")), None);
    assert_eq!(effective_destination(Some("out/order.json")), Some("out/order.json"));
}

#[test]
fn run_target_publishes_and_writes_destination_and_reports() -> TestResult {
    init_tracing();

    let fs = SourceTreeBuilder::new()
        .module("js/app.js", &["app"], &["util", "nowhere"])
        .module("js/util.js", &["util"], &[])
        .build();

    let cfg = ConfigFileBuilder::new()
        .not_found_report("out/notfound.csv")
        .with_target(
            "web",
            TargetConfigBuilder::new("js/*.js").dest("out/order.json").build(),
        )
        .with_target(
            "nodest",
            TargetConfigBuilder::new("js/*.js")
                .dest("src")
                .output_property("custom.key")
                .build(),
        )
        .build();

    let pipeline = Pipeline::new(&fs, Path::new("."));
    let mut store = PropertyStore::new();

    for target in cfg.targets().values() {
        let extractor = Extractor::from_options(&target.options)?;
        pipeline.run_target(target, &extractor, &mut store)?;
    }

    let expected = vec!["js/util.js".to_string(), "js/app.js".to_string()];
    assert_eq!(store.get("file_dependencies.web.ordered_files"), Some(expected.as_slice()));
    assert_eq!(store.get("custom.key"), Some(expected.as_slice()));

    let written = fs.read_to_string(&PathBuf::from("out/order.json"))?;
    let parsed: Vec<String> = serde_json::from_str(&written)?;
    assert_eq!(parsed, expected);

    // Only the "web" target has a destination.
    let json_files: Vec<PathBuf> = fs
        .files()
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == "json"))
        .collect();
    assert_eq!(json_files, vec![PathBuf::from("out/order.json")]);

    let report = fs.read_to_string(&PathBuf::from("out/notfound.csv"))?;
    assert_eq!(report, "nowhere,js/app.js\n");
    Ok(())
}
