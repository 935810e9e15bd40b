// src/config/mod.rs

//! Configuration loading and validation for buildwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk and apply `BUILDWATCH_*` environment
//!   overrides (`loader.rs`).
//! - Validate globs, paths and the server section (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{apply_env_overrides, load_and_validate, load_from_path};
pub use model::{
    AssetsSection, ConfigFile, ScriptsSection, ServerSection, StylesSection, WatchSection,
};
pub use validate::validate_config;
