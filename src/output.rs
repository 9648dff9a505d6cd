// src/output.rs

//! Publishing the ordered list and writing the report artifacts.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::resolve::UnresolvedRequirements;

/// Destination value meaning "no destination file".
pub const NO_DESTINATION: &str = "src";

/// Shared state the caller hands in; ordered lists are published here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyStore {
    properties: BTreeMap<String, Vec<String>>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value.
    pub fn publish(&mut self, key: &str, files: &[String]) {
        debug!(key = %key, files = files.len(), "publishing ordered files");
        self.properties.insert(key.to_string(), files.to_vec());
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.properties.get(key).map(|v| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// The destination to write, or `None` when absent, empty or [`NO_DESTINATION`].
pub fn effective_destination(dest: Option<&str>) -> Option<&str> {
    dest.map(str::trim)
        .filter(|d| !d.is_empty() && *d != NO_DESTINATION)
}

/// Serialize `files` as a JSON array to `dest`.
pub fn write_destination(fs: &dyn FileSystem, dest: &Path, files: &[String]) -> Result<()> {
    let json = serde_json::to_string(files)?;
    fs.write(dest, json.as_bytes())?;
    info!(dest = %dest.display(), files = files.len(), "wrote ordered file list");
    Ok(())
}

/// One line per unresolved symbol: the symbol, then every requesting file.
pub fn render_not_found_report(unresolved: &UnresolvedRequirements) -> String {
    let mut out = String::new();
    for (symbol, files) in unresolved.iter() {
        let mut row: Vec<String> = Vec::with_capacity(files.len() + 1);
        row.push(csv_field(symbol));
        row.extend(files.iter().map(|f| csv_field(f)));
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

pub fn write_not_found_report(
    fs: &dyn FileSystem,
    path: &Path,
    unresolved: &UnresolvedRequirements,
) -> Result<()> {
    fs.write(path, render_not_found_report(unresolved).as_bytes())?;
    info!(
        path = %path.display(),
        symbols = unresolved.len(),
        "wrote not-found report"
    );
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
