// src/pipeline/styles.rs

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::StylesSection;
use crate::engine::Step;
use crate::errors::Result;
use crate::pipeline::command::run_tool;
use crate::pipeline::{Pipeline, StepFuture};

/// Style compiler collaborator: one entry stylesheet in, one bundle out.
///
/// Thin wrapper over the configured compiler binary (`sass` by default); the
/// entire compile is delegated to the tool.
#[derive(Debug)]
pub struct Styles {
    glob: String,
    entry: String,
    output: PathBuf,
    include_paths: Vec<String>,
    command: String,
    source_maps: bool,
}

impl Styles {
    pub fn from_config(cfg: &StylesSection, source_maps: bool) -> Self {
        Self {
            glob: cfg.glob.clone(),
            entry: cfg.entry.clone(),
            output: PathBuf::from(&cfg.output),
            include_paths: cfg.include_paths.clone(),
            command: cfg.command.clone(),
            source_maps,
        }
    }

    /// Glob over the style sources this pipeline watches.
    pub fn watch_glob(&self) -> &str {
        &self.glob
    }

    /// Compile the entry stylesheet into the output bundle.
    pub async fn compile(&self) -> Result<()> {
        let mut args = vec![self.entry.clone(), self.output.display().to_string()];
        for path in &self.include_paths {
            args.push("--load-path".to_string());
            args.push(path.clone());
        }
        if !self.source_maps {
            args.push("--no-source-map".to_string());
        }

        run_tool("styles", &self.command, &args).await?;
        info!("styles ready");
        Ok(())
    }
}

impl Step for Styles {
    fn execute(&self) -> StepFuture<'_> {
        Box::pin(self.compile())
    }
}

impl Pipeline for Styles {
    fn name(&self) -> &str {
        "styles"
    }

    fn output_path(&self) -> &Path {
        &self.output
    }

    fn run(&self) -> StepFuture<'_> {
        Box::pin(self.compile())
    }
}
