// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod extract;
pub mod fs;
pub mod graph;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod resolve;
pub mod sources;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::{ConfigFile, Target};
use crate::errors::{FiledepsError, Result};
use crate::extract::Extractor;
use crate::fs::RealFileSystem;
use crate::output::PropertyStore;
use crate::pipeline::Pipeline;

pub use crate::pipeline::Ordering;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - target selection
/// - one ordering run per target
/// - printing the published lists
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let targets = selected_targets(&cfg, args.target.as_deref())?;
    let root = config_root_dir(&config_path);
    let fs = RealFileSystem;

    let store = run_targets(&fs, &root, &targets)?;

    for (key, files) in store.iter() {
        println!("{key} = {}", serde_json::to_string(files)?);
    }

    Ok(())
}

/// Order each target in turn, publishing into a fresh [`PropertyStore`].
///
/// Stops at the first fatal error (a strict-mode cycle or an IO failure).
pub fn run_targets(
    fs: &dyn crate::fs::FileSystem,
    root: &Path,
    targets: &[&Target],
) -> Result<PropertyStore> {
    let pipeline = Pipeline::new(fs, root);
    let mut store = PropertyStore::new();

    for target in targets {
        let extractor = Extractor::from_options(&target.options)?;
        let ordering = pipeline.run_target(target, &extractor, &mut store)?;

        if !ordering.missing.is_empty() {
            warn!(target = %target.name, missing = ?ordering.missing, "some source files were not found");
        }
        info!(
            target = %target.name,
            files = ordering.files.len(),
            property = %target.options.output_property,
            "target ordered"
        );
    }

    Ok(store)
}

fn selected_targets<'a>(cfg: &'a ConfigFile, only: Option<&str>) -> Result<Vec<&'a Target>> {
    match only {
        Some(name) => cfg
            .target(name)
            .map(|t| vec![t])
            .ok_or_else(|| FiledepsError::ConfigError(format!("unknown target '{name}'"))),
        None => Ok(cfg.targets().values().collect()),
    }
}

/// Source patterns and report paths are relative to the config's directory.
///
/// - If the config path has a non-empty parent (e.g. "build/Filedeps.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Filedeps.toml" (parent = ""),
///   we fall back to the current working directory "."
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Simple dry-run output: print targets and their effective options.
fn print_dry_run(cfg: &ConfigFile) {
    println!("filedeps dry-run");
    println!();

    println!("targets ({}):", cfg.targets().len());
    for (name, target) in cfg.targets().iter() {
        let opts = &target.options;
        println!("  - {name}");
        println!("      src: {:?}", target.src);
        if let Some(ref dest) = target.dest {
            println!("      dest: {dest}");
        }
        println!("      output_property: {}", opts.output_property);
        println!("      extract_defines_pattern: {}", opts.extract_defines_pattern);
        println!("      extract_requires_pattern: {}", opts.extract_requires_pattern);
        println!("      skip_required_myself: {}", opts.skip_required_myself);
        println!("      force_make_file_list: {}", opts.force_make_file_list);
        println!("      cycle_dot_report: {}", opts.cycle_dot_report.display());
        if let Some(ref report) = opts.not_found_report {
            println!("      not_found_report: {}", report.display());
        }
    }

    debug!("dry-run complete (nothing ordered)");
}
