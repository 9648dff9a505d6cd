// src/config/mod.rs

//! Configuration loading and validation for filedeps.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate targets and extraction rules (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ConfigFile, Options, OptionsSection, RawConfigFile, Target, TargetConfig};
pub use validate::validate_options;
