// src/engine/orchestrator.rs

use std::sync::Arc;

use tracing::{error, info};

use crate::errors::Result;
use crate::pipeline::StepFuture;

/// Object-safe hook one initial-build step implements.
pub trait Step: Send + Sync {
    fn execute(&self) -> StepFuture<'_>;
}

/// Runs the full build once, in strict sequence, before any coordinator is
/// armed: asset copy, then style compile, then full transpile, then bundle.
///
/// Each step must succeed before the next begins; any failure aborts the
/// session, so the dev server is never pointed at a tree built from a
/// partially-completed pipeline.
pub struct Orchestrator {
    steps: [(&'static str, Arc<dyn Step>); 4],
}

impl Orchestrator {
    pub fn new(
        assets: Arc<dyn Step>,
        styles: Arc<dyn Step>,
        transpile: Arc<dyn Step>,
        bundle: Arc<dyn Step>,
    ) -> Self {
        Self {
            steps: [
                ("assets", assets),
                ("styles", styles),
                ("transpile", transpile),
                ("bundle", bundle),
            ],
        }
    }

    /// Run the initial build. Fatal on the first failing step.
    pub async fn build(&self) -> Result<()> {
        for (name, step) in &self.steps {
            info!(step = name, "initial build step");
            if let Err(err) = step.execute().await {
                error!(step = name, error = %err, "initial build failed");
                return Err(err);
            }
        }

        info!("initial build complete");
        Ok(())
    }
}
