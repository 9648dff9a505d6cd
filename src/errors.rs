// src/errors.rs

//! Crate-wide error type.
//!
//! Per-file and per-symbol anomalies (missing inputs, unresolved requires)
//! are never errors; they are logged and collected on the result. Only
//! configuration problems, IO failures and a strict-mode cycle end a run.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FiledepsError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("invalid {rule} pattern: {source}")]
    PatternError {
        rule: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{}", cycle_message(.files, .report))]
    CyclicDependency { files: Vec<String>, report: PathBuf },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn cycle_message(files: &[String], report: &Path) -> String {
    let mut message = String::from("A cyclic dependency was found among the following files:\n");
    for file in files {
        message.push_str("  ");
        message.push_str(file);
        message.push('\n');
    }
    message.push_str(&format!(
        "See exported cycle dependency graph: {}",
        report.display()
    ));
    message
}

pub type Result<T> = std::result::Result<T, FiledepsError>;
