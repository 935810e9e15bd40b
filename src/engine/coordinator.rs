// src/engine/coordinator.rs

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::depth::{CompleteAction, EventAction, PendingDepth};
use crate::errors::Result;
use crate::pipeline::Pipeline;
use crate::reload::ReloadNotifier;
use crate::watch::{ExcludeSet, WatchEvent};

/// Events consumed by a rebuild coordinator.
///
/// - watchers send `ChangeDetected`
/// - the spawned run task sends `RunFinished` back into the same channel
/// - Ctrl-C handling (or a test) sends `Shutdown`
#[derive(Debug)]
pub enum CoordinatorEvent {
    ChangeDetected(WatchEvent),
    RunFinished(Result<()>),
    Shutdown,
}

/// Options that influence how a coordinator behaves.
#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    /// Delay between a successful rebuild and the full-verification pass.
    /// Only relevant when the pipeline exposes a `verify()` step.
    pub verify_delay: Duration,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            verify_delay: Duration::from_millis(1000),
        }
    }
}

/// Rebuild coordinator for one pipeline.
///
/// Translates a burst of filesystem events into a minimal, non-overlapping
/// sequence of pipeline invocations: at most one `run()` is in flight at any
/// instant, and at most one rerun is queued behind it (see [`PendingDepth`]).
/// After each successful run the live-reload notifier is invoked with the
/// pipeline's output path.
///
/// All state lives in this single event loop, so the read-modify-start
/// sequence between a new event and a completing run cannot race. There is
/// no cancellation and no timeout: a stuck `run()` stalls this pipeline's
/// coordinator and nothing else.
pub struct RebuildCoordinator {
    pipeline: Arc<dyn Pipeline>,
    notifier: Arc<dyn ReloadNotifier>,
    excludes: ExcludeSet,
    options: CoordinatorOptions,
    depth: PendingDepth,

    events_rx: mpsc::Receiver<CoordinatorEvent>,
    /// Clone handed to spawned run tasks so completions re-enter the loop.
    self_tx: mpsc::Sender<CoordinatorEvent>,
}

impl RebuildCoordinator {
    /// Create a coordinator and the sender used to feed it events.
    pub fn new(
        pipeline: Arc<dyn Pipeline>,
        notifier: Arc<dyn ReloadNotifier>,
        excludes: ExcludeSet,
        options: CoordinatorOptions,
    ) -> (Self, mpsc::Sender<CoordinatorEvent>) {
        let (tx, rx) = mpsc::channel(64);
        let coordinator = Self {
            pipeline,
            notifier,
            excludes,
            options,
            depth: PendingDepth::new(),
            events_rx: rx,
            self_tx: tx.clone(),
        };
        (coordinator, tx)
    }

    /// Main event loop. `Shutdown` is the only exit: the coordinator keeps a
    /// sender of its own for run completions, so the channel never closes on
    /// its own.
    pub async fn run(mut self) -> Result<()> {
        info!(pipeline = %self.pipeline.name(), "rebuild coordinator armed");

        while let Some(event) = self.events_rx.recv().await {
            match event {
                CoordinatorEvent::ChangeDetected(ev) => self.handle_change(ev),
                CoordinatorEvent::RunFinished(result) => self.handle_run_finished(result),
                CoordinatorEvent::Shutdown => {
                    info!(pipeline = %self.pipeline.name(), "coordinator shutting down");
                    break;
                }
            }
        }

        Ok(())
    }

    fn handle_change(&mut self, event: WatchEvent) {
        let rel = event.path_str();
        if self.excludes.is_excluded(&rel) {
            debug!(pipeline = %self.pipeline.name(), path = %rel, "event excluded");
            return;
        }

        // Fast per-event work (single-file transpile) runs outside the
        // coalescing path.
        self.pipeline.on_event(&event);

        match self.depth.on_event() {
            EventAction::Start => {
                debug!(pipeline = %self.pipeline.name(), path = %rel, "starting rebuild");
                self.start_run();
            }
            EventAction::Queued => {
                debug!(pipeline = %self.pipeline.name(), path = %rel, "rebuild queued");
            }
            EventAction::Coalesced => {}
        }
    }

    fn handle_run_finished(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {
                info!(pipeline = %self.pipeline.name(), "rebuild finished");
                self.notifier.notify(self.pipeline.output_path());
                self.schedule_verify();
            }
            Err(err) => {
                // Non-fatal: the depth still advances below, so the next
                // event gets a fresh compile.
                warn!(pipeline = %self.pipeline.name(), error = %err, "rebuild failed");
            }
        }

        match self.depth.on_complete() {
            CompleteAction::StartNext => {
                debug!(pipeline = %self.pipeline.name(), "starting queued rebuild");
                self.start_run();
            }
            CompleteAction::Idle => {
                debug!(pipeline = %self.pipeline.name(), "pipeline idle");
            }
        }
    }

    /// Spawn the active run; its completion re-enters the loop as
    /// `RunFinished`.
    fn start_run(&self) {
        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.self_tx.clone();
        tokio::spawn(async move {
            let result = pipeline.run().await;
            // A closed channel means the coordinator is gone; nothing to do.
            let _ = tx.send(CoordinatorEvent::RunFinished(result)).await;
        });
    }

    /// Schedule one slow full-verification pass after the configured delay.
    ///
    /// Runs independently of the coalescing state and does not touch the
    /// depth counter.
    fn schedule_verify(&self) {
        if self.pipeline.verify().is_none() {
            return;
        }

        let pipeline = Arc::clone(&self.pipeline);
        let delay = self.options.verify_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(step) = pipeline.verify() else {
                return;
            };
            if let Err(err) = step.await {
                warn!(pipeline = %pipeline.name(), error = %err, "verification pass failed");
            }
        });
    }
}
