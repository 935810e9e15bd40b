// src/config/loader.rs

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;
use crate::errors::{BuildwatchError, Result};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "BUILDWATCH_";

/// Load a configuration file from a given path and return the raw `ConfigFile`.
///
/// A missing file is not an error: every setting has a default, and a project
/// laid out conventionally needs no config file at all. This only performs
/// TOML deserialization; use [`load_and_validate`] for the full pipeline of
/// defaults + env overrides + validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();

    if !path.exists() {
        debug!(?path, "no config file found, using defaults");
        return Ok(ConfigFile::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file at {:?}", path))?;

    let config: ConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file, apply environment overrides, and validate.
///
/// This is the entry point used by the rest of the application:
///
/// - Reads TOML (missing file ⇒ defaults).
/// - Applies `BUILDWATCH_*` environment overrides on top.
/// - Checks globs compile, paths are non-empty, and the server section is sane.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let mut config = load_from_path(&path)?;
    apply_env_overrides(&mut config)?;
    validate_config(&config)?;
    Ok(config)
}

/// Apply `BUILDWATCH_*` environment variable overrides to a loaded config.
///
/// Environment takes precedence over the file, so a developer can point a
/// single invocation at a different tree without editing the config.
pub fn apply_env_overrides(config: &mut ConfigFile) -> Result<()> {
    override_string(&mut config.styles.glob, "STYLES_GLOB");
    override_string(&mut config.styles.entry, "STYLES_ENTRY");
    override_string(&mut config.styles.output, "STYLES_OUTPUT");
    override_string(&mut config.scripts.glob, "SCRIPTS_GLOB");
    override_string(&mut config.scripts.output, "SCRIPTS_OUTPUT");
    override_string(&mut config.server.root, "SERVER_ROOT");
    override_string(&mut config.server.host, "SERVER_HOST");

    if let Some(port) = env_var("SERVER_PORT") {
        config.server.port = port.trim().parse().map_err(|_| {
            BuildwatchError::Config(format!(
                "{ENV_PREFIX}SERVER_PORT must be a port number (got {port:?})"
            ))
        })?;
    }

    if let Some(mounts) = env_var("SERVER_MOUNTS") {
        config.server.mounts = parse_mounts(&mounts)?;
    }

    Ok(())
}

fn env_var(suffix: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{suffix}")).ok()
}

fn override_string(target: &mut String, suffix: &str) {
    if let Some(value) = env_var(suffix) {
        debug!(var = %format!("{ENV_PREFIX}{suffix}"), %value, "config override from environment");
        *target = value;
    }
}

/// Parse `BUILDWATCH_SERVER_MOUNTS` as comma-separated `url=dir` pairs, e.g.
/// `/node_modules=./node_modules,/vendor=./vendor`.
fn parse_mounts(raw: &str) -> Result<Vec<(String, String)>> {
    let mut mounts = Vec::new();
    for pair in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let (url, dir) = pair.split_once('=').ok_or_else(|| {
            BuildwatchError::Config(format!(
                "invalid mount {pair:?} in {ENV_PREFIX}SERVER_MOUNTS (expected url=dir)"
            ))
        })?;
        mounts.push((url.trim().to_string(), dir.trim().to_string()));
    }
    Ok(mounts)
}
