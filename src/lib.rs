// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod reload;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::{CliArgs, ModeFlags};
use crate::config::load_and_validate;
use crate::engine::{
    CoordinatorEvent, CoordinatorOptions, Orchestrator, RebuildCoordinator, Step,
};
use crate::pipeline::{Assets, Bundler, Pipeline, ScriptPipeline, Styles, Transpiler};
use crate::reload::{LogNotifier, ReloadNotifier};
use crate::watch::{spawn_watcher, ExcludeSet, WatchGlob, WatchRoute};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + env overrides)
/// - the strictly sequential initial build
/// - one rebuild coordinator per pipeline, plus the file watcher
/// - the live-reload notifier
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let flags = ModeFlags::for_mode(args.mode);
    info!(mode = ?args.mode, source_maps = flags.source_maps, verify = flags.verify, "mode selected");

    // Pipeline collaborators.
    let assets = Arc::new(Assets::from_config(&cfg.assets)?);
    let styles = Arc::new(Styles::from_config(&cfg.styles, flags.source_maps));
    let transpiler = Arc::new(Transpiler::from_config(&cfg.scripts, flags.source_maps));
    let bundler = Bundler::from_config(&cfg.scripts, flags.source_maps);
    let scripts = Arc::new(ScriptPipeline::new(
        Arc::clone(&transpiler),
        bundler,
        flags.verify,
    ));

    // Initial build: assets, styles, transpile, bundle. A failure here is
    // fatal and nothing below gets armed.
    let orchestrator = Orchestrator::new(
        Arc::clone(&assets) as Arc<dyn Step>,
        Arc::clone(&styles) as Arc<dyn Step>,
        Arc::clone(&transpiler) as Arc<dyn Step>,
        Arc::clone(&scripts) as Arc<dyn Step>,
    );
    orchestrator.build().await?;

    if args.once {
        info!("--once: initial build done, not watching");
        return Ok(());
    }

    // Live-reload channel, started only now that the tree is complete.
    let notifier: Arc<dyn ReloadNotifier> = Arc::new(LogNotifier);

    info!(
        host = %cfg.server.host,
        port = cfg.server.port,
        root = %cfg.server.root,
        mounts = ?cfg.server.mounts,
        "dev server settings"
    );

    // One coordinator per pipeline; the two rebuild independently.
    let excludes = ExcludeSet::compile(&cfg.watch.exclude)?;
    let options = CoordinatorOptions {
        verify_delay: Duration::from_millis(cfg.watch.verify_delay_ms),
    };

    let (styles_coordinator, styles_tx) = RebuildCoordinator::new(
        Arc::clone(&styles) as Arc<dyn Pipeline>,
        Arc::clone(&notifier),
        excludes.clone(),
        options.clone(),
    );
    let (scripts_coordinator, scripts_tx) = RebuildCoordinator::new(
        Arc::clone(&scripts) as Arc<dyn Pipeline>,
        Arc::clone(&notifier),
        excludes,
        options,
    );

    let routes = vec![
        WatchRoute {
            name: "styles".to_string(),
            glob: WatchGlob::compile(styles.watch_glob())?,
            tx: styles_tx.clone(),
        },
        WatchRoute {
            name: "scripts".to_string(),
            glob: WatchGlob::compile(scripts.watch_glob())?,
            tx: scripts_tx.clone(),
        },
    ];
    let _watcher_handle = spawn_watcher(PathBuf::from("."), routes)?;

    // Ctrl-C → graceful shutdown of both coordinators.
    {
        let txs = [styles_tx.clone(), scripts_tx.clone()];
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            for tx in &txs {
                let _ = tx.send(CoordinatorEvent::Shutdown).await;
            }
        });
    }

    let styles_task = tokio::spawn(styles_coordinator.run());
    let scripts_task = tokio::spawn(scripts_coordinator.run());

    let (styles_result, scripts_result) = tokio::try_join!(styles_task, scripts_task)
        .context("coordinator task panicked")?;
    styles_result?;
    scripts_result?;

    info!("buildwatch session ended");
    Ok(())
}
