#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use filedeps::config::{ConfigFile, OptionsSection, RawConfigFile, TargetConfig};
use filedeps::fs::mock::MockFileSystem;

/// Source text for a module using the default `define`/`require` rules.
///
/// ```text
/// define("a");
/// require("b");
/// ```
pub fn module_source(defines: &[&str], requires: &[&str]) -> String {
    let mut out = String::new();
    for d in defines {
        out.push_str(&format!("define(\"{d}\", function () {{}});\n"));
    }
    for r in requires {
        out.push_str(&format!("var x = require('{r}');\n"));
    }
    out
}

/// Builder for an in-memory source tree.
pub struct SourceTreeBuilder {
    fs: MockFileSystem,
}

impl SourceTreeBuilder {
    pub fn new() -> Self {
        Self {
            fs: MockFileSystem::new(),
        }
    }

    /// Add a file with raw content.
    pub fn file(self, path: &str, content: &str) -> Self {
        self.fs.add_file(path, content);
        self
    }

    /// Add a module file with the given defines and requires.
    pub fn module(self, path: &str, defines: &[&str], requires: &[&str]) -> Self {
        self.fs.add_file(path, module_source(defines, requires));
        self
    }

    pub fn build(self) -> MockFileSystem {
        self.fs
    }
}

impl Default for SourceTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                options: OptionsSection::default(),
                target: BTreeMap::new(),
            },
        }
    }

    pub fn with_target(mut self, name: &str, target: TargetConfig) -> Self {
        self.config.target.insert(name.to_string(), target);
        self
    }

    pub fn skip_required_myself(mut self, val: bool) -> Self {
        self.config.options.skip_required_myself = val;
        self
    }

    pub fn force_make_file_list(mut self, val: bool) -> Self {
        self.config.options.force_make_file_list = val;
        self
    }

    pub fn cycle_dot_report(mut self, path: &str) -> Self {
        self.config.options.cycle_dot_report = PathBuf::from(path);
        self
    }

    pub fn not_found_report(mut self, path: &str) -> Self {
        self.config.options.not_found_report = Some(PathBuf::from(path));
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TargetConfig`.
pub struct TargetConfigBuilder {
    target: TargetConfig,
}

impl TargetConfigBuilder {
    pub fn new(src: &str) -> Self {
        Self {
            target: TargetConfig {
                src: vec![src.to_string()],
                ..TargetConfig::default()
            },
        }
    }

    pub fn src(mut self, pattern: &str) -> Self {
        self.target.src.push(pattern.to_string());
        self
    }

    pub fn dest(mut self, dest: &str) -> Self {
        self.target.dest = Some(dest.to_string());
        self
    }

    pub fn output_property(mut self, key: &str) -> Self {
        self.target.output_property = Some(key.to_string());
        self
    }

    pub fn defines_pattern(mut self, pattern: &str) -> Self {
        self.target.extract_defines_pattern = Some(pattern.to_string());
        self
    }

    pub fn requires_pattern(mut self, pattern: &str) -> Self {
        self.target.extract_requires_pattern = Some(pattern.to_string());
        self
    }

    pub fn skip_required_myself(mut self, val: bool) -> Self {
        self.target.skip_required_myself = Some(val);
        self
    }

    pub fn force_make_file_list(mut self, val: bool) -> Self {
        self.target.force_make_file_list = Some(val);
        self
    }

    pub fn cycle_dot_report(mut self, path: &str) -> Self {
        self.target.cycle_dot_report = Some(PathBuf::from(path));
        self
    }

    pub fn not_found_report(mut self, path: &str) -> Self {
        self.target.not_found_report = Some(PathBuf::from(path));
        self
    }

    pub fn build(self) -> TargetConfig {
        self.target
    }
}
