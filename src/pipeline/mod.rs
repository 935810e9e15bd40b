// src/pipeline/mod.rs

//! Pipeline collaborators.
//!
//! Each compilation path (styles, scripts) is a thin wrapper around an
//! external tool invoked via `tokio::process::Command`; the asset copier is a
//! plain filesystem copy. The rebuild coordinators only see the [`Pipeline`]
//! trait, which is the whole collaborator contract:
//!
//! - `run()` means "do one full/incremental compile now". It is safe to call
//!   repeatedly; the coordinator guarantees it is never in flight twice.
//! - `on_event()` is the fast per-event hook (single-file transpile); it runs
//!   outside the coalescing path.
//! - `verify()` is the slow full-program re-check scheduled after a
//!   successful rebuild, when the mode enables it.

pub mod assets;
pub mod command;
pub mod scripts;
pub mod styles;

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crate::errors::Result;
use crate::watch::WatchEvent;

pub use assets::Assets;
pub use command::run_tool;
pub use scripts::{Bundler, ScriptPipeline, Transpiler};
pub use styles::Styles;

/// Boxed future used for async collaborator operations behind `dyn` traits.
pub type StepFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// One source-to-artifact compilation path, as seen by a rebuild coordinator.
pub trait Pipeline: Send + Sync + 'static {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// The artifact handed to the live-reload notifier after a successful run.
    fn output_path(&self) -> &Path;

    /// Perform one compile. Resolves on success, rejects with a compile/IO
    /// error on failure. Never invoked concurrently with itself.
    fn run(&self) -> StepFuture<'_>;

    /// Fast per-event work, fired for every accepted watch event regardless
    /// of coalescing. Default: nothing.
    fn on_event(&self, _event: &WatchEvent) {}

    /// The slow full-program re-check, if this pipeline has one enabled.
    fn verify(&self) -> Option<StepFuture<'_>> {
        None
    }
}
