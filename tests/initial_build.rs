// tests/initial_build.rs

//! Initial build sequencing: strict order, first failure aborts the rest.

mod common;

use std::error::Error;
use std::sync::{Arc, Mutex};

use buildwatch::engine::{Orchestrator, Step};

use crate::common::{init_tracing, FakeStep};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn build_runs_all_steps_in_order() -> TestResult {
    init_tracing();
    let log = Arc::new(Mutex::new(Vec::new()));

    let orchestrator = Orchestrator::new(
        FakeStep::ok("assets", Arc::clone(&log)) as Arc<dyn Step>,
        FakeStep::ok("styles", Arc::clone(&log)) as Arc<dyn Step>,
        FakeStep::ok("transpile", Arc::clone(&log)) as Arc<dyn Step>,
        FakeStep::ok("bundle", Arc::clone(&log)) as Arc<dyn Step>,
    );

    orchestrator.build().await?;
    assert_eq!(*log.lock().unwrap(), vec!["assets", "styles", "transpile", "bundle"]);
    Ok(())
}

#[tokio::test]
async fn styles_failure_stops_before_transpile_and_bundle() -> TestResult {
    init_tracing();
    let log = Arc::new(Mutex::new(Vec::new()));

    let orchestrator = Orchestrator::new(
        FakeStep::ok("assets", Arc::clone(&log)) as Arc<dyn Step>,
        FakeStep::failing("styles", Arc::clone(&log)) as Arc<dyn Step>,
        FakeStep::ok("transpile", Arc::clone(&log)) as Arc<dyn Step>,
        FakeStep::ok("bundle", Arc::clone(&log)) as Arc<dyn Step>,
    );

    let result = orchestrator.build().await;
    assert!(result.is_err());
    assert_eq!(*log.lock().unwrap(), vec!["assets", "styles"]);
    Ok(())
}

#[tokio::test]
async fn asset_failure_runs_nothing_else() -> TestResult {
    init_tracing();
    let log = Arc::new(Mutex::new(Vec::new()));

    let orchestrator = Orchestrator::new(
        FakeStep::failing("assets", Arc::clone(&log)) as Arc<dyn Step>,
        FakeStep::ok("styles", Arc::clone(&log)) as Arc<dyn Step>,
        FakeStep::ok("transpile", Arc::clone(&log)) as Arc<dyn Step>,
        FakeStep::ok("bundle", Arc::clone(&log)) as Arc<dyn Step>,
    );

    let result = orchestrator.build().await;
    assert!(result.is_err());
    assert_eq!(*log.lock().unwrap(), vec!["assets"]);
    Ok(())
}
