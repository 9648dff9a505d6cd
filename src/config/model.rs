// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Default rule for `define("name")`-style declarations.
pub const DEFAULT_DEFINES_PATTERN: &str = r#"define\s*\(\s*['"]([^'"]+)['"]"#;

/// Default rule for `require("name")`-style references.
pub const DEFAULT_REQUIRES_PATTERN: &str = r#"require\s*\(\s*['"]([^'"]+)['"]"#;

/// Default file name of the DOT report written when a cycle is found.
pub const DEFAULT_CYCLE_DOT_REPORT: &str = "cyclemap.dot";

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [options]
/// skip_required_myself = true
/// cycle_dot_report = "build/cyclemap.dot"
///
/// [target.app]
/// src = ["js/**/*.js"]
/// dest = "build/app-order.json"
///
/// [target.tests]
/// src = ["test/**/*.js"]
/// force_make_file_list = true
/// ```
///
/// `[options]` holds defaults shared by every target; each `[target.<name>]`
/// may override any of them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub options: OptionsSection,

    #[serde(default)]
    pub target: BTreeMap<String, TargetConfig>,
}

/// Validated configuration.
///
/// Construct with `ConfigFile::try_from(raw)` (see `validate.rs`) or
/// [`crate::config::load_and_validate`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    options: OptionsSection,
    targets: BTreeMap<String, Target>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(options: OptionsSection, targets: BTreeMap<String, Target>) -> Self {
        Self { options, targets }
    }

    pub fn options_section(&self) -> &OptionsSection {
        &self.options
    }

    /// All targets, keyed and ordered by name.
    pub fn targets(&self) -> &BTreeMap<String, Target> {
        &self.targets
    }

    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.get(name)
    }
}

/// `[options]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionsSection {
    /// Regex with exactly one capture group; group 1 is a defined symbol.
    #[serde(default = "default_defines_pattern")]
    pub extract_defines_pattern: String,

    /// Regex with exactly one capture group; group 1 is a required symbol.
    #[serde(default = "default_requires_pattern")]
    pub extract_requires_pattern: String,

    /// Drop edges from a file to a symbol it defines itself.
    #[serde(default)]
    pub skip_required_myself: bool,

    /// Lenient cycle handling: report the cycle, then append the stuck
    /// files anyway instead of failing.
    #[serde(default)]
    pub force_make_file_list: bool,

    #[serde(default = "default_cycle_dot_report")]
    pub cycle_dot_report: PathBuf,

    /// Where to write the unresolved-requirements table, if anywhere.
    #[serde(default)]
    pub not_found_report: Option<PathBuf>,
}

fn default_defines_pattern() -> String {
    DEFAULT_DEFINES_PATTERN.to_string()
}

fn default_requires_pattern() -> String {
    DEFAULT_REQUIRES_PATTERN.to_string()
}

fn default_cycle_dot_report() -> PathBuf {
    PathBuf::from(DEFAULT_CYCLE_DOT_REPORT)
}

impl Default for OptionsSection {
    fn default() -> Self {
        Self {
            extract_defines_pattern: default_defines_pattern(),
            extract_requires_pattern: default_requires_pattern(),
            skip_required_myself: false,
            force_make_file_list: false,
            cycle_dot_report: default_cycle_dot_report(),
            not_found_report: None,
        }
    }
}

/// `[target.<name>]` section.
///
/// Every option is optional here; `None` means "inherit from `[options]`".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetConfig {
    /// Glob patterns (or literal paths) naming the candidate files.
    #[serde(default)]
    pub src: Vec<String>,

    /// Destination for the JSON-serialized ordered list.
    #[serde(default)]
    pub dest: Option<String>,

    #[serde(default)]
    pub output_property: Option<String>,

    #[serde(default)]
    pub extract_defines_pattern: Option<String>,

    #[serde(default)]
    pub extract_requires_pattern: Option<String>,

    #[serde(default)]
    pub skip_required_myself: Option<bool>,

    #[serde(default)]
    pub force_make_file_list: Option<bool>,

    #[serde(default)]
    pub cycle_dot_report: Option<PathBuf>,

    #[serde(default)]
    pub not_found_report: Option<PathBuf>,
}

/// Effective options for one ordering run.
///
/// Passed explicitly into every stage that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Key under which the ordered list is published.
    pub output_property: String,
    pub extract_defines_pattern: String,
    pub extract_requires_pattern: String,
    pub skip_required_myself: bool,
    pub force_make_file_list: bool,
    pub cycle_dot_report: PathBuf,
    pub not_found_report: Option<PathBuf>,
}

impl Options {
    /// Defaults for a run named `name`.
    pub fn new(name: &str) -> Self {
        Self::merged(name, &OptionsSection::default(), &TargetConfig::default())
    }

    /// Merge the shared `[options]` with one target's overrides.
    pub fn merged(name: &str, defaults: &OptionsSection, target: &TargetConfig) -> Self {
        Self {
            output_property: target
                .output_property
                .clone()
                .unwrap_or_else(|| default_output_property(name)),
            extract_defines_pattern: target
                .extract_defines_pattern
                .clone()
                .unwrap_or_else(|| defaults.extract_defines_pattern.clone()),
            extract_requires_pattern: target
                .extract_requires_pattern
                .clone()
                .unwrap_or_else(|| defaults.extract_requires_pattern.clone()),
            skip_required_myself: target
                .skip_required_myself
                .unwrap_or(defaults.skip_required_myself),
            force_make_file_list: target
                .force_make_file_list
                .unwrap_or(defaults.force_make_file_list),
            cycle_dot_report: target
                .cycle_dot_report
                .clone()
                .unwrap_or_else(|| defaults.cycle_dot_report.clone()),
            not_found_report: target
                .not_found_report
                .clone()
                .or_else(|| defaults.not_found_report.clone()),
        }
    }
}

/// `file_dependencies.<target>.ordered_files`
pub fn default_output_property(name: &str) -> String {
    format!("file_dependencies.{name}.ordered_files")
}

/// A validated target: its sources, destination and effective options.
#[derive(Debug, Clone)]
pub struct Target {
    pub name: String,
    pub src: Vec<String>,
    pub dest: Option<String>,
    pub options: Options,
}
