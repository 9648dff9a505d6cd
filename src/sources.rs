// src/sources.rs

//! Turning a target's `src` patterns into file records.
//!
//! Paths are kept relative to the project root, with `/` separators, and
//! that spelling is what ends up in the ordered list.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use globset::Glob;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::extract::FileRecord;
use crate::fs::FileSystem;

/// Expand `patterns` under `root`, in pattern order.
///
/// - A glob pattern contributes its matches sorted by path.
/// - A pattern without glob metacharacters is taken literally, whether or
///   not the file exists, so a missing input can be reported later.
/// - A pattern starting with `!` removes earlier matches.
/// - A leading `./` is ignored, since matched paths are root-relative.
/// - A path produced by an earlier pattern is not repeated.
pub fn expand_sources(fs: &dyn FileSystem, root: &Path, patterns: &[String]) -> Result<Vec<String>> {
    let mut all_files: Option<Vec<String>> = None;
    let mut out: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for pattern in patterns {
        if let Some(negated) = pattern.strip_prefix('!') {
            let matcher = Glob::new(relative(negated))
                .with_context(|| format!("invalid glob pattern: {pattern}"))?
                .compile_matcher();
            out.retain(|p| !matcher.is_match(p));
            seen.retain(|p| !matcher.is_match(p));
            continue;
        }

        if !is_glob(pattern) {
            let literal = relative(pattern).to_string();
            if seen.insert(literal.clone()) {
                out.push(literal);
            }
            continue;
        }

        let matcher = Glob::new(relative(pattern))
            .with_context(|| format!("invalid glob pattern: {pattern}"))?
            .compile_matcher();

        if all_files.is_none() {
            all_files = Some(collect_files(fs, root)?);
        }
        let files = all_files.as_deref().unwrap_or_default();

        let mut matched: Vec<&String> = files.iter().filter(|f| matcher.is_match(f.as_str())).collect();
        matched.sort();
        debug!(pattern = %pattern, matches = matched.len(), "expanded source pattern");

        for path in matched {
            if seen.insert(path.clone()) {
                out.push(path.clone());
            }
        }
    }

    Ok(out)
}

fn relative(pattern: &str) -> &str {
    pattern.trim_start_matches("./")
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

/// Every file under `root`, relative to it.
fn collect_files(fs: &dyn FileSystem, root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if fs.is_dir(&path) {
                stack.push(path);
            } else if fs.is_file(&path) {
                if let Ok(rel) = path.strip_prefix(root) {
                    files.push(rel.to_string_lossy().replace('\\', "/"));
                }
            }
        }
    }

    Ok(files)
}

/// Read every existing path into a [`FileRecord`].
///
/// Paths that do not exist are dropped with a warning and returned as the
/// second element; they take no further part in ordering.
pub fn load_records(
    fs: &dyn FileSystem,
    root: &Path,
    paths: &[String],
) -> Result<(Vec<FileRecord>, Vec<String>)> {
    let mut records = Vec::with_capacity(paths.len());
    let mut missing = Vec::new();

    for path in paths {
        let full: PathBuf = root.join(path);
        if !fs.is_file(&full) {
            warn!(path = %path, "source file not found");
            missing.push(path.clone());
            continue;
        }
        let content = fs.read_to_string(&full)?;
        records.push(FileRecord::new(path.clone(), content));
    }

    Ok((records, missing))
}
