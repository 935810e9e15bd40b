// src/config/validate.rs

use globset::Glob;

use crate::config::model::ConfigFile;
use crate::errors::{BuildwatchError, Result};

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - required paths (globs, entry, outputs) are non-empty
/// - every glob pattern compiles
/// - the `[server]` section is usable (non-zero port, non-empty mount pairs)
///
/// Any violation is a `Config` error, which is fatal at startup: a dev server
/// must never come up against a half-configured build.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_styles(cfg)?;
    validate_scripts(cfg)?;
    validate_assets(cfg)?;
    validate_server(cfg)?;
    validate_watch(cfg)?;
    Ok(())
}

fn validate_styles(cfg: &ConfigFile) -> Result<()> {
    require_non_empty(&cfg.styles.glob, "[styles].glob")?;
    require_non_empty(&cfg.styles.entry, "[styles].entry")?;
    require_non_empty(&cfg.styles.output, "[styles].output")?;
    require_glob(&cfg.styles.glob, "[styles].glob")?;
    Ok(())
}

fn validate_scripts(cfg: &ConfigFile) -> Result<()> {
    require_non_empty(&cfg.scripts.glob, "[scripts].glob")?;
    require_non_empty(&cfg.scripts.entry, "[scripts].entry")?;
    require_non_empty(&cfg.scripts.output, "[scripts].output")?;
    require_non_empty(&cfg.scripts.out_dir, "[scripts].out_dir")?;
    require_glob(&cfg.scripts.glob, "[scripts].glob")?;
    Ok(())
}

fn validate_assets(cfg: &ConfigFile) -> Result<()> {
    require_non_empty(&cfg.assets.source, "[assets].source")?;
    require_non_empty(&cfg.assets.dest, "[assets].dest")?;
    for pattern in &cfg.assets.exclude {
        require_glob(pattern, "[assets].exclude")?;
    }
    Ok(())
}

fn validate_server(cfg: &ConfigFile) -> Result<()> {
    require_non_empty(&cfg.server.root, "[server].root")?;
    require_non_empty(&cfg.server.host, "[server].host")?;

    if cfg.server.port == 0 {
        return Err(BuildwatchError::Config(
            "[server].port must be non-zero".to_string(),
        ));
    }

    for (url, dir) in &cfg.server.mounts {
        if url.is_empty() || dir.is_empty() {
            return Err(BuildwatchError::Config(format!(
                "[server].mounts entry ({url:?}, {dir:?}) must have a non-empty url and directory"
            )));
        }
    }

    Ok(())
}

fn validate_watch(cfg: &ConfigFile) -> Result<()> {
    for pattern in &cfg.watch.exclude {
        require_glob(pattern, "[watch].exclude")?;
    }
    Ok(())
}

fn require_non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BuildwatchError::Config(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_glob(pattern: &str, field: &str) -> Result<()> {
    Glob::new(pattern).map_err(|e| {
        BuildwatchError::Config(format!("{field} has invalid glob {pattern:?}: {e}"))
    })?;
    Ok(())
}
