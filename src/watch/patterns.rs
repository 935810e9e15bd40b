// src/watch/patterns.rs

use std::fmt;

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::errors::Result;

/// Compiled exclusion patterns for editor temp/swap files and anything else
/// configured under `[watch].exclude`.
///
/// Patterns match against paths relative to the project root, with forward
/// slashes (e.g. `"src/styles/main.scss"`).
#[derive(Clone)]
pub struct ExcludeSet {
    set: GlobSet,
}

impl fmt::Debug for ExcludeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExcludeSet").finish_non_exhaustive()
    }
}

impl ExcludeSet {
    pub fn compile(patterns: &[String]) -> Result<Self> {
        let set = build_globset(patterns).context("building watch exclude globset")?;
        Ok(Self { set })
    }

    /// An exclude set that matches nothing.
    pub fn empty() -> Self {
        Self {
            set: GlobSet::empty(),
        }
    }

    pub fn is_excluded(&self, rel_path: &str) -> bool {
        self.set.is_match(rel_path)
    }
}

/// Watch glob for a single pipeline, used by the watcher to decide which
/// coordinator a changed path belongs to.
#[derive(Clone)]
pub struct WatchGlob {
    pattern: String,
    set: GlobSet,
}

impl fmt::Debug for WatchGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchGlob")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

impl WatchGlob {
    pub fn compile(pattern: &str) -> Result<Self> {
        let set = build_globset(std::slice::from_ref(&pattern.to_string()))
            .with_context(|| format!("building watch globset for {pattern:?}"))?;
        Ok(Self {
            pattern: pattern.to_string(),
            set,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns true if the pipeline is interested in the given path
    /// (relative to project root).
    pub fn matches(&self, rel_path: &str) -> bool {
        self.set.is_match(rel_path)
    }
}

/// Build a GlobSet from simple string patterns.
fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
