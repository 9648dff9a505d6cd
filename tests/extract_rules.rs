mod common;
use crate::common::init_tracing;

use filedeps::config::Options;
use filedeps::errors::FiledepsError;
use filedeps::extract::{Extract, Extractor, FileRecord, PatternRule};

#[test]
fn default_rules_pick_up_define_and_require_calls() {
    init_tracing();

    let extractor = Extractor::from_options(&Options::new("t")).unwrap();
    let content = r#"
        define("app/main", ["dep"], function () {});
        var a = require('lib/a');
        var b = require ( "lib/b" );
        var again = require("lib/a");
    "#;

    assert_eq!(extractor.defines(content), vec!["app/main"]);
    assert_eq!(extractor.requires(content), vec!["lib/a", "lib/b"]);
}

#[test]
fn duplicates_keep_first_occurrence_order() {
    let rule = PatternRule::new("requires", r"use (\w+);").unwrap();
    let names = rule.extract("use b; use a; use b; use c; use a;");
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[test]
fn custom_functions_replace_either_slot() {
    init_tracing();

    let extractor = Extractor::from_options(&Options::new("t"))
        .unwrap()
        .with_defines(|content: &str| -> Vec<String> {
            content
                .lines()
                .filter_map(|l| l.strip_prefix("// provides "))
                .map(|s| s.trim().to_string())
                .collect()
        })
        .with_requires(|content: &str| -> Vec<String> {
            content
                .lines()
                .filter_map(|l| l.strip_prefix("// needs "))
                .map(|s| s.trim().to_string())
                .collect()
        });

    let mut record = FileRecord::new(
        "x.js",
        "// provides x\n// needs y\n// needs y\ndefine('ignored');\n",
    );
    record.extract(&extractor);

    assert_eq!(record.defines, vec!["x"]);
    // Repeats from a custom rule are still removed.
    assert_eq!(record.requires, vec!["y"]);
}

#[test]
fn pattern_without_exactly_one_group_is_rejected() {
    match PatternRule::new("defines", r"define\(\w+\)") {
        Err(FiledepsError::ConfigError(msg)) => assert!(msg.contains("exactly one capture group")),
        other => panic!("expected ConfigError, got {other:?}"),
    }

    match PatternRule::new("defines", r"(a)(b)") {
        Err(FiledepsError::ConfigError(msg)) => assert!(msg.contains("found 2")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn invalid_regex_is_a_pattern_error() {
    match PatternRule::new("requires", r"require\((") {
        Err(FiledepsError::PatternError { rule, .. }) => assert_eq!(rule, "requires"),
        other => panic!("expected PatternError, got {other:?}"),
    }
}

#[test]
fn empty_and_odd_symbol_names_are_opaque() {
    let rule = PatternRule::new("requires", r"need<([^>]*)>").unwrap();
    let names = rule.extract("need<> need<a b> need<>");
    assert_eq!(names, vec!["", "a b"]);
}
