// src/pipeline/scripts.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::ScriptsSection;
use crate::engine::Step;
use crate::errors::Result;
use crate::pipeline::command::run_tool;
use crate::pipeline::{Pipeline, StepFuture};
use crate::watch::{ChangeKind, WatchEvent};

/// Script transpiler collaborator.
///
/// Two speeds, both delegated to the configured tool (`tsc` by default):
/// - `transpile(path)`: emit one changed file into the intermediate
///   directory, no cross-file type checking. Fast enough to run per event.
/// - `transpile_all()`: the full program with diagnostics. Slow; only run as
///   the initial build step and as the post-rebuild verification pass.
#[derive(Debug)]
pub struct Transpiler {
    glob: String,
    out_dir: String,
    command: String,
    source_maps: bool,
}

impl Transpiler {
    pub fn from_config(cfg: &ScriptsSection, source_maps: bool) -> Self {
        Self {
            glob: cfg.glob.clone(),
            out_dir: cfg.out_dir.clone(),
            command: cfg.transpiler.clone(),
            source_maps,
        }
    }

    pub fn watch_glob(&self) -> &str {
        &self.glob
    }

    /// Fast single-file transpile of a changed source file.
    pub async fn transpile(&self, path: &Path) -> Result<()> {
        let mut args = vec![
            path.display().to_string(),
            "--outDir".to_string(),
            self.out_dir.clone(),
        ];
        if self.source_maps {
            args.push("--sourceMap".to_string());
        }

        run_tool("scripts", &self.command, &args).await?;
        info!(path = %path.display(), "quick transpile done");
        Ok(())
    }

    /// Slow full-program transpile with type checking, driven by the
    /// project's own compiler configuration.
    pub async fn transpile_all(&self) -> Result<()> {
        let mut args = vec!["--project".to_string(), ".".to_string()];
        if self.source_maps {
            args.push("--sourceMap".to_string());
        }

        run_tool("scripts", &self.command, &args).await?;
        info!("full transpile done");
        Ok(())
    }
}

/// The initial build's "transpile" step: the slow full-program pass.
impl Step for Transpiler {
    fn execute(&self) -> StepFuture<'_> {
        Box::pin(self.transpile_all())
    }
}

/// Module bundler collaborator: one transpiled entry in, one bundle out.
#[derive(Debug)]
pub struct Bundler {
    entry: String,
    output: PathBuf,
    command: String,
    source_maps: bool,
}

impl Bundler {
    pub fn from_config(cfg: &ScriptsSection, source_maps: bool) -> Self {
        Self {
            entry: cfg.entry.clone(),
            output: PathBuf::from(&cfg.output),
            command: cfg.bundler.clone(),
            source_maps,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Bundle the transpiled intermediates into the output artifact.
    pub async fn bundle(&self) -> Result<()> {
        let mut args = vec![
            self.entry.clone(),
            "--bundle".to_string(),
            format!("--outfile={}", self.output.display()),
        ];
        if self.source_maps {
            args.push("--sourcemap".to_string());
        }

        run_tool("scripts", &self.command, &args).await?;
        info!("bundle ready");
        Ok(())
    }
}

/// The scripts pipeline as seen by its rebuild coordinator: the coalesced
/// `run()` is a re-bundle, every accepted event additionally gets a fast
/// single-file transpile, and (mode permitting) each successful rebuild is
/// followed by a full type-checking pass.
pub struct ScriptPipeline {
    transpiler: Arc<Transpiler>,
    bundler: Bundler,
    verify_enabled: bool,
}

impl ScriptPipeline {
    pub fn new(transpiler: Arc<Transpiler>, bundler: Bundler, verify_enabled: bool) -> Self {
        Self {
            transpiler,
            bundler,
            verify_enabled,
        }
    }

    pub fn watch_glob(&self) -> &str {
        self.transpiler.watch_glob()
    }
}

/// The initial build's "bundle" step.
impl Step for ScriptPipeline {
    fn execute(&self) -> StepFuture<'_> {
        Box::pin(self.bundler.bundle())
    }
}

impl Pipeline for ScriptPipeline {
    fn name(&self) -> &str {
        "scripts"
    }

    fn output_path(&self) -> &Path {
        self.bundler.output_path()
    }

    fn run(&self) -> StepFuture<'_> {
        Box::pin(self.bundler.bundle())
    }

    fn on_event(&self, event: &WatchEvent) {
        // Removed files have nothing to transpile; the re-bundle picks up
        // the deletion.
        if !matches!(event.kind, ChangeKind::Added | ChangeKind::Changed) {
            return;
        }

        let transpiler = Arc::clone(&self.transpiler);
        let path = event.path.clone();
        tokio::spawn(async move {
            if let Err(err) = transpiler.transpile(&path).await {
                warn!(path = %path.display(), error = %err, "quick transpile failed");
            }
        });
    }

    fn verify(&self) -> Option<StepFuture<'_>> {
        if self.verify_enabled {
            Some(Box::pin(self.transpiler.transpile_all()))
        } else {
            None
        }
    }
}
