// tests/common/mod.rs

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

use buildwatch::engine::Step;
use buildwatch::errors::{BuildwatchError, Result};
use buildwatch::pipeline::{Pipeline, StepFuture};
use buildwatch::reload::ReloadNotifier;

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Poll `predicate` until it holds, failing the test after 5 seconds.
pub async fn wait_until(what: &str, predicate: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !predicate() {
        if tokio::time::Instant::now() > deadline {
            panic!("timed out waiting for {what}");
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// A fake pipeline whose runs only complete when the test releases them
/// through the gate channel, so tests control exactly when the coordinator
/// sees a completion.
pub struct FakePipeline {
    output: PathBuf,
    started: AtomicUsize,
    verify_runs: AtomicUsize,
    verify_enabled: bool,
    gate: tokio::sync::Mutex<mpsc::UnboundedReceiver<Result<()>>>,
}

impl FakePipeline {
    /// Returns the pipeline and the sender that releases one run per message.
    /// Dropping the sender makes all further runs complete immediately.
    pub fn gated() -> (Arc<Self>, mpsc::UnboundedSender<Result<()>>) {
        Self::gated_with_verify(false)
    }

    pub fn gated_with_verify(
        verify_enabled: bool,
    ) -> (Arc<Self>, mpsc::UnboundedSender<Result<()>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let pipeline = Arc::new(Self {
            output: PathBuf::from("dist/fake.out"),
            started: AtomicUsize::new(0),
            verify_runs: AtomicUsize::new(0),
            verify_enabled,
            gate: tokio::sync::Mutex::new(rx),
        });
        (pipeline, tx)
    }

    pub fn runs_started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn verify_runs(&self) -> usize {
        self.verify_runs.load(Ordering::SeqCst)
    }

    /// An error of the shape a real collaborator would produce.
    pub fn compile_error() -> BuildwatchError {
        BuildwatchError::compile("fake", "tool exited with code 1")
    }
}

impl Pipeline for FakePipeline {
    fn name(&self) -> &str {
        "fake"
    }

    fn output_path(&self) -> &Path {
        &self.output
    }

    fn run(&self) -> StepFuture<'_> {
        Box::pin(async move {
            self.started.fetch_add(1, Ordering::SeqCst);
            let mut gate = self.gate.lock().await;
            match gate.recv().await {
                Some(result) => result,
                None => Ok(()),
            }
        })
    }

    fn verify(&self) -> Option<StepFuture<'_>> {
        if !self.verify_enabled {
            return None;
        }
        Some(Box::pin(async move {
            self.verify_runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }))
    }
}

/// Notifier that collects every notified path.
#[derive(Default)]
pub struct CollectingNotifier {
    paths: Mutex<Vec<PathBuf>>,
}

impl CollectingNotifier {
    pub fn count(&self) -> usize {
        self.paths.lock().unwrap().len()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.paths.lock().unwrap().clone()
    }
}

impl ReloadNotifier for CollectingNotifier {
    fn notify(&self, path: &Path) {
        self.paths.lock().unwrap().push(path.to_path_buf());
    }
}

/// An initial-build step that records its execution into a shared log and
/// optionally fails.
pub struct FakeStep {
    name: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
    fail: bool,
}

impl FakeStep {
    pub fn ok(name: &'static str, log: Arc<Mutex<Vec<&'static str>>>) -> Arc<Self> {
        Arc::new(Self { name, log, fail: false })
    }

    pub fn failing(name: &'static str, log: Arc<Mutex<Vec<&'static str>>>) -> Arc<Self> {
        Arc::new(Self { name, log, fail: true })
    }
}

impl Step for FakeStep {
    fn execute(&self) -> StepFuture<'_> {
        Box::pin(async move {
            self.log.lock().unwrap().push(self.name);
            if self.fail {
                Err(BuildwatchError::compile(self.name, "step failed"))
            } else {
                Ok(())
            }
        })
    }
}
