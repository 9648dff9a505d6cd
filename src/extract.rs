// src/extract.rs

//! Pattern-based extraction of defined and required symbol names.
//!
//! Extraction is not syntactic: a rule is anything that maps raw file text
//! to a list of names. The default rules are regexes with a single capture
//! group; integrators can plug in arbitrary functions instead.

use std::fmt;

use regex::Regex;

use crate::config::model::Options;
use crate::errors::{FiledepsError, Result};

/// One extraction rule.
pub trait Extract {
    /// Names found in `content`, deduplicated, in first-occurrence order.
    fn extract(&self, content: &str) -> Vec<String>;
}

impl<F> Extract for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn extract(&self, content: &str) -> Vec<String> {
        self(content)
    }
}

/// A compiled regex whose first capture group is the symbol name.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
}

impl PatternRule {
    /// Compile `pattern`; `rule` names the slot for error messages.
    pub fn new(rule: &'static str, pattern: &str) -> Result<Self> {
        let regex =
            Regex::new(pattern).map_err(|source| FiledepsError::PatternError { rule, source })?;

        // `captures_len` counts the implicit whole-match group too.
        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(FiledepsError::ConfigError(format!(
                "{rule} pattern must have exactly one capture group (found {groups}): {pattern}"
            )));
        }

        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Extract for PatternRule {
    fn extract(&self, content: &str) -> Vec<String> {
        extract_matches(content, &self.regex)
    }
}

/// Collect capture group 1 of every match, dropping repeats.
pub fn extract_matches(content: &str, regex: &Regex) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in regex.captures_iter(content) {
        let Some(m) = caps.get(1) else {
            continue;
        };
        if !names.iter().any(|n| n == m.as_str()) {
            names.push(m.as_str().to_string());
        }
    }
    names
}

/// The two extraction slots used for a run.
///
/// Built once from [`Options`]; either slot can then be replaced.
pub struct Extractor {
    defines: Box<dyn Extract>,
    requires: Box<dyn Extract>,
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor").finish_non_exhaustive()
    }
}

impl Extractor {
    pub fn new(defines: impl Extract + 'static, requires: impl Extract + 'static) -> Self {
        Self {
            defines: Box::new(defines),
            requires: Box::new(requires),
        }
    }

    /// Regex slots from `extract_defines_pattern` / `extract_requires_pattern`.
    pub fn from_options(options: &Options) -> Result<Self> {
        Ok(Self::new(
            PatternRule::new("defines", &options.extract_defines_pattern)?,
            PatternRule::new("requires", &options.extract_requires_pattern)?,
        ))
    }

    /// Replace the defines slot.
    pub fn with_defines(mut self, rule: impl Extract + 'static) -> Self {
        self.defines = Box::new(rule);
        self
    }

    /// Replace the requires slot.
    pub fn with_requires(mut self, rule: impl Extract + 'static) -> Self {
        self.requires = Box::new(rule);
        self
    }

    pub fn defines(&self, content: &str) -> Vec<String> {
        dedup(self.defines.extract(content))
    }

    pub fn requires(&self, content: &str) -> Vec<String> {
        dedup(self.requires.extract(content))
    }
}

// Custom rules are not trusted to deduplicate.
fn dedup(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// A candidate input file and the symbols extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    pub content: String,
    pub defines: Vec<String>,
    pub requires: Vec<String>,
}

impl FileRecord {
    /// Record with no symbols yet; see [`FileRecord::extract`].
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            defines: Vec::new(),
            requires: Vec::new(),
        }
    }

    /// Fill `defines` and `requires` from `content`.
    pub fn extract(&mut self, extractor: &Extractor) {
        self.defines = extractor.defines(&self.content);
        self.requires = extractor.requires(&self.content);
    }
}
