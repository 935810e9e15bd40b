// src/reload.rs

//! Live-reload channel boundary.
//!
//! The actual transport (websocket, SSE, whatever the dev server speaks) is
//! outside this crate; the core only needs a `notify(path)` it can call after
//! every successful rebuild. Implementations must tolerate repeated and
//! concurrent calls from either pipeline's completion handler.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::info;

/// Consumed by the rebuild coordinators: "this output artifact changed".
pub trait ReloadNotifier: Send + Sync {
    fn notify(&self, path: &Path);
}

/// Notifier that traces each changed artifact. The stand-in transport when no
/// dev server is wired up.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl ReloadNotifier for LogNotifier {
    fn notify(&self, path: &Path) {
        info!(path = %path.display(), "reload");
    }
}

/// Notifier backed by an unbounded channel, for consumers that want the
/// stream of changed paths (a dev-server integration, or a test).
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<PathBuf>,
}

impl ReloadNotifier for ChannelNotifier {
    fn notify(&self, path: &Path) {
        // A closed receiver just means nobody is listening any more.
        let _ = self.tx.send(path.to_path_buf());
    }
}

/// Create a channel-backed notifier together with its receiving end.
pub fn channel() -> (ChannelNotifier, mpsc::UnboundedReceiver<PathBuf>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelNotifier { tx }, rx)
}
