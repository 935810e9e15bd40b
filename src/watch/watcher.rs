// src/watch/watcher.rs

use std::path::{Path, PathBuf};

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::CoordinatorEvent;
use crate::watch::event::{classify, WatchEvent};
use crate::watch::patterns::WatchGlob;

/// One pipeline's slice of the watch: its glob and the channel into its
/// rebuild coordinator.
#[derive(Debug)]
pub struct WatchRoute {
    pub name: String,
    pub glob: WatchGlob,
    pub tx: mpsc::Sender<CoordinatorEvent>,
}

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive
/// for as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher that observes the given `root` directory
/// recursively and forwards a `WatchEvent` to every route whose glob matches
/// a changed path.
///
/// - `root` is the project root against which all glob patterns are evaluated.
/// - `routes` carries one entry per armed pipeline.
pub fn spawn_watcher(root: impl Into<PathBuf>, routes: Vec<WatchRoute>) -> Result<WatcherHandle> {
    let root = root.into();
    let root = root.canonicalize().unwrap_or_else(|_| root.clone()); // best-effort

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    // Closure called synchronously by notify whenever an event arrives.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // We can't log via tracing here easily, so fallback to stderr.
                    eprintln!("buildwatch: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("buildwatch: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!("file watcher started on {:?}", root);

    // Async task that consumes notify events and routes them to coordinators.
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!("received notify event: {:?}", event);

            let Some(kind) = classify(&event.kind) else {
                continue;
            };

            for path in &event.paths {
                let Some(rel) = relative_path(&root, path) else {
                    warn!("could not relativize path {:?} against root {:?}", path, root);
                    continue;
                };

                let watch_event = WatchEvent::new(rel, kind);
                let rel_str = watch_event.path_str();

                for route in &routes {
                    if route.glob.matches(&rel_str) {
                        debug!(
                            pipeline = %route.name,
                            path = %rel_str,
                            ?kind,
                            "watch match -> forwarding to coordinator"
                        );
                        if let Err(err) = route
                            .tx
                            .send(CoordinatorEvent::ChangeDetected(watch_event.clone()))
                            .await
                        {
                            warn!(pipeline = %route.name, "coordinator channel closed: {err}");
                            // If a coordinator is gone the session is ending;
                            // no point keeping the watcher loop alive.
                            return;
                        }
                    }
                }
            }
        }

        debug!("file watcher loop ended");
    });

    Ok(WatcherHandle { _inner: watcher })
}

/// Strip `root` from `path`, yielding the relative path glob matching expects.
///
/// Returns `None` if the path is not under `root`.
fn relative_path(root: &Path, path: &Path) -> Option<PathBuf> {
    path.strip_prefix(root).ok().map(|p| p.to_path_buf())
}
