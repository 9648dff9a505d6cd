// src/resolve.rs

//! Symbol resolution: who defines what, and which file each require points at.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::model::Options;
use crate::extract::FileRecord;

/// Symbol name -> the single file that owns it.
///
/// When several files define the same symbol, the last one in input order
/// wins. The earlier owner is dropped without an error (only a warning).
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    owners: HashMap<String, String>,
}

impl SymbolTable {
    pub fn from_records(records: &[FileRecord]) -> Self {
        let mut owners: HashMap<String, String> = HashMap::new();
        for record in records {
            for symbol in &record.defines {
                if let Some(previous) = owners.insert(symbol.clone(), record.path.clone()) {
                    if previous != record.path {
                        warn!(
                            symbol = %symbol,
                            previous = %previous,
                            owner = %record.path,
                            "symbol defined more than once; the later file wins"
                        );
                    }
                }
            }
        }
        Self { owners }
    }

    pub fn owner_of(&self, symbol: &str) -> Option<&str> {
        self.owners.get(symbol).map(|s| s.as_str())
    }

    /// Whether `path` is the current owner of `symbol`.
    pub fn owns(&self, path: &str, symbol: &str) -> bool {
        self.owner_of(symbol) == Some(path)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// A require that matched some file's define.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEdge {
    pub from: String,
    pub to: String,
    pub symbol: String,
}

/// Unresolved symbol -> requesting files, both in first-seen order.
///
/// Reporting only; never part of the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnresolvedRequirements {
    entries: Vec<(String, Vec<String>)>,
}

impl UnresolvedRequirements {
    pub fn record(&mut self, symbol: &str, required_by: &str) {
        match self.entries.iter_mut().find(|(s, _)| s == symbol) {
            Some((_, files)) => {
                if !files.iter().any(|f| f == required_by) {
                    files.push(required_by.to_string());
                }
            }
            None => self
                .entries
                .push((symbol.to_string(), vec![required_by.to_string()])),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(symbol, files)| (symbol.as_str(), files.as_slice()))
    }

    pub fn required_by(&self, symbol: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, files)| files.as_slice())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.required_by(symbol).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output of [`resolve`].
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub table: SymbolTable,
    /// In input order: per file, per require.
    pub edges: Vec<ResolvedEdge>,
    pub unresolved: UnresolvedRequirements,
}

/// Build the symbol table and resolve every require against it.
pub fn resolve(records: &[FileRecord], options: &Options) -> Resolution {
    let table = SymbolTable::from_records(records);
    let mut edges = Vec::new();
    let mut unresolved = UnresolvedRequirements::default();

    for record in records {
        for symbol in &record.requires {
            match table.owner_of(symbol) {
                Some(owner) if owner == record.path && options.skip_required_myself => {
                    debug!(path = %record.path, symbol = %symbol, "skipping self requirement");
                }
                Some(owner) => edges.push(ResolvedEdge {
                    from: record.path.clone(),
                    to: owner.to_string(),
                    symbol: symbol.clone(),
                }),
                None => {
                    warn!(
                        symbol = %symbol,
                        required_by = %record.path,
                        "required symbol not found"
                    );
                    unresolved.record(symbol, &record.path);
                }
            }
        }
    }

    debug!(
        symbols = table.len(),
        edges = edges.len(),
        unresolved = unresolved.len(),
        "symbols resolved"
    );

    Resolution {
        table,
        edges,
        unresolved,
    }
}
