// src/config/validate.rs

use std::collections::BTreeMap;

use crate::config::model::{ConfigFile, Options, RawConfigFile, Target};
use crate::errors::{FiledepsError, Result};
use crate::extract::PatternRule;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = FiledepsError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_targets(&raw)?;

        let mut targets = BTreeMap::new();
        for (name, target) in raw.target.iter() {
            if target.src.is_empty() {
                return Err(FiledepsError::ConfigError(format!(
                    "target '{name}' must list at least one `src` pattern"
                )));
            }

            let options = Options::merged(name, &raw.options, target);
            validate_options(name, &options)?;

            targets.insert(
                name.clone(),
                Target {
                    name: name.clone(),
                    src: target.src.clone(),
                    dest: target.dest.clone(),
                    options,
                },
            );
        }

        Ok(ConfigFile::new_unchecked(raw.options, targets))
    }
}

fn ensure_has_targets(cfg: &RawConfigFile) -> Result<()> {
    if cfg.target.is_empty() {
        return Err(FiledepsError::ConfigError(
            "config must contain at least one [target.<name>] section".to_string(),
        ));
    }
    Ok(())
}

/// Check one target's effective options.
///
/// Both extraction rules must compile and have exactly one capture group.
pub fn validate_options(name: &str, options: &Options) -> Result<()> {
    PatternRule::new("defines", &options.extract_defines_pattern)?;
    PatternRule::new("requires", &options.extract_requires_pattern)?;

    if options.output_property.trim().is_empty() {
        return Err(FiledepsError::ConfigError(format!(
            "target '{name}' has an empty `output_property`"
        )));
    }

    if options.cycle_dot_report.as_os_str().is_empty() {
        return Err(FiledepsError::ConfigError(format!(
            "target '{name}' has an empty `cycle_dot_report` path"
        )));
    }

    Ok(())
}
