// src/pipeline/assets.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info, warn};

use crate::config::AssetsSection;
use crate::engine::Step;
use crate::errors::{BuildwatchError, Result};
use crate::pipeline::StepFuture;

/// Static asset copier: mirrors the asset directory and the HTML entry page
/// into the output tree.
///
/// Compiled artifacts (`*.js`, `*.css` by default) are excluded so stale
/// copies in the asset tree never clobber a fresh bundle.
#[derive(Debug)]
pub struct Assets {
    source: PathBuf,
    dest: PathBuf,
    index: PathBuf,
    index_dest: PathBuf,
    exclude: GlobSet,
}

impl Assets {
    pub fn from_config(cfg: &AssetsSection) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &cfg.exclude {
            let glob = Glob::new(pattern).map_err(|e| {
                BuildwatchError::Config(format!(
                    "[assets].exclude has invalid glob {pattern:?}: {e}"
                ))
            })?;
            builder.add(glob);
        }
        let exclude = builder.build().context("building asset exclude globset")?;

        Ok(Self {
            source: PathBuf::from(&cfg.source),
            dest: PathBuf::from(&cfg.dest),
            index: PathBuf::from(&cfg.index),
            index_dest: PathBuf::from(&cfg.index_dest),
            exclude,
        })
    }

    /// Copy the asset tree and the index page.
    ///
    /// The walk is synchronous filesystem work, so it runs on the blocking
    /// pool. A missing source directory or index page is skipped with a
    /// warning rather than failing the build; a project without static
    /// assets is legitimate.
    pub async fn copy(&self) -> Result<()> {
        let source = self.source.clone();
        let dest = self.dest.clone();
        let index = self.index.clone();
        let index_dest = self.index_dest.clone();
        let exclude = self.exclude.clone();

        tokio::task::spawn_blocking(move || {
            if index.exists() {
                ensure_parent_dir(&index_dest)?;
                fs::copy(&index, &index_dest)
                    .with_context(|| format!("copying {index:?} to {index_dest:?}"))?;
                debug!(?index, ?index_dest, "copied index page");
            } else {
                warn!(?index, "index page missing, skipping");
            }

            if source.is_dir() {
                copy_tree(&source, &dest, &source, &exclude)?;
            } else {
                warn!(?source, "asset directory missing, skipping");
            }

            Ok::<(), BuildwatchError>(())
        })
        .await
        .context("asset copy task panicked")??;

        info!("assets ready");
        Ok(())
    }
}

impl Step for Assets {
    fn execute(&self) -> StepFuture<'_> {
        Box::pin(self.copy())
    }
}

/// Recursive copy of `dir` into `dest`, skipping paths (relative to `base`)
/// matching the exclude set. Symlinks are followed via `fs::copy` semantics.
fn copy_tree(dir: &Path, dest: &Path, base: &Path, exclude: &GlobSet) -> Result<()> {
    fs::create_dir_all(dest).with_context(|| format!("creating {dest:?}"))?;

    for entry in fs::read_dir(dir).with_context(|| format!("reading {dir:?}"))? {
        let entry = entry.with_context(|| format!("reading entry in {dir:?}"))?;
        let path = entry.path();
        let target = dest.join(entry.file_name());

        let rel = path.strip_prefix(base).unwrap_or(&path);
        let rel_str = rel.to_string_lossy().replace('\\', "/");
        if exclude.is_match(&rel_str) {
            debug!(path = %rel_str, "asset excluded from copy");
            continue;
        }

        let file_type = entry
            .file_type()
            .with_context(|| format!("stat of {path:?}"))?;

        if file_type.is_dir() {
            copy_tree(&path, &target, base, exclude)?;
        } else {
            fs::copy(&path, &target)
                .with_context(|| format!("copying {path:?} to {target:?}"))?;
        }
    }

    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {parent:?}"))?;
    }
    Ok(())
}
