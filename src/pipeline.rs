// src/pipeline.rs

//! One ordering run, end to end.
//!
//! paths -> records -> extract -> resolve -> graph -> sort
//!                                                  `-> prune -> DOT report

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::config::model::{Options, Target};
use crate::errors::{FiledepsError, Result};
use crate::extract::{Extractor, FileRecord};
use crate::fs::FileSystem;
use crate::graph::{sort, write_dot, DependencyGraph};
use crate::output::{effective_destination, write_destination, write_not_found_report, PropertyStore};
use crate::resolve::{resolve, UnresolvedRequirements};
use crate::sources::{expand_sources, load_records};

/// Everything a run found out.
#[derive(Debug, Clone)]
pub struct Ordering {
    /// Ordered file paths.
    pub files: Vec<String>,
    /// `files`, grouped by sort pass. A forced tail is its own last layer.
    pub layers: Vec<Vec<String>>,
    /// Input paths that did not exist.
    pub missing: Vec<String>,
    pub unresolved: UnresolvedRequirements,
    /// Files reported as cyclic when the list was forced (lenient mode).
    pub cycle: Option<Vec<String>>,
    pub graph: DependencyGraph,
}

/// Where a run reads and writes.
///
/// Relative report and destination paths are resolved against `root`.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    fs: &'a dyn FileSystem,
    root: &'a Path,
}

impl<'a> Pipeline<'a> {
    pub fn new(fs: &'a dyn FileSystem, root: &'a Path) -> Self {
        Self { fs, root }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Order a configured target, publish the result and write its destination.
    pub fn run_target(
        &self,
        target: &Target,
        extractor: &Extractor,
        store: &mut PropertyStore,
    ) -> Result<Ordering> {
        let paths = expand_sources(self.fs, self.root, &target.src)?;
        info!(target = %target.name, candidates = paths.len(), "ordering target");

        let ordering = self.order_files(&paths, extractor, &target.options)?;

        store.publish(&target.options.output_property, &ordering.files);
        if let Some(dest) = effective_destination(target.dest.as_deref()) {
            write_destination(self.fs, &self.resolve_path(Path::new(dest)), &ordering.files)?;
        }

        Ok(ordering)
    }

    /// Order the given paths; missing ones are dropped with a warning.
    pub fn order_files(
        &self,
        paths: &[String],
        extractor: &Extractor,
        options: &Options,
    ) -> Result<Ordering> {
        let (records, missing) = load_records(self.fs, self.root, paths)?;
        let mut ordering = self.order_records(records, extractor, options)?;
        ordering.missing = missing;
        Ok(ordering)
    }

    /// Order records whose content has already been read.
    pub fn order_records(
        &self,
        mut records: Vec<FileRecord>,
        extractor: &Extractor,
        options: &Options,
    ) -> Result<Ordering> {
        for record in records.iter_mut() {
            record.extract(extractor);
        }

        let resolution = resolve(&records, options);
        let graph = DependencyGraph::build(&records, &resolution);

        if let Some(report) = &options.not_found_report {
            write_not_found_report(self.fs, &self.resolve_path(report), &resolution.unresolved)?;
        }

        let mut outcome = sort(&graph);
        let mut cycle = None;

        if let Some(stuck) = &outcome.stuck {
            let report = self.resolve_path(&options.cycle_dot_report);
            write_dot(self.fs, &report, &stuck.cycle)?;
            let files: Vec<String> = stuck.cycle.paths().map(str::to_string).collect();

            if !options.force_make_file_list {
                error!(cycle = ?files, report = %report.display(), "cyclic dependency");
                return Err(FiledepsError::CyclicDependency { files, report });
            }

            warn!(
                cycle = ?files,
                report = %report.display(),
                "cyclic dependency; appending the remaining files unordered"
            );
            cycle = Some(files);
            outcome.force_complete();
        }

        info!(
            files = outcome.order.len(),
            layers = outcome.layers.len(),
            unresolved = resolution.unresolved.len(),
            "ordering complete"
        );

        Ok(Ordering {
            files: outcome.order,
            layers: outcome.layers,
            missing: Vec::new(),
            unresolved: resolution.unresolved,
            cycle,
            graph,
        })
    }
}
