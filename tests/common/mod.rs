#![allow(dead_code)]

use std::path::Path;

use filedeps::config::Options;
use filedeps::errors::Result;
use filedeps::extract::Extractor;
use filedeps::fs::mock::MockFileSystem;
use filedeps::pipeline::{Ordering, Pipeline};

pub use filedeps_test_utils::init_tracing;

/// Order `paths` on a mock tree rooted at ".", with the rules from `options`.
pub fn order(fs: &MockFileSystem, paths: &[&str], options: &Options) -> Result<Ordering> {
    let extractor = Extractor::from_options(options)?;
    let paths: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
    Pipeline::new(fs, Path::new(".")).order_files(&paths, &extractor, options)
}

/// Position of `path` in `files`; panics if absent.
pub fn pos(files: &[String], path: &str) -> usize {
    files
        .iter()
        .position(|f| f == path)
        .unwrap_or_else(|| panic!("{path} missing from {files:?}"))
}
