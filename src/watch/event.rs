// src/watch/event.rs

use std::path::PathBuf;

use notify::event::{EventKind, ModifyKind};

/// What happened to a watched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Changed,
    Removed,
}

/// A single filesystem change, relativized against the project root.
///
/// Ephemeral: events are consumed by a coordinator and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl WatchEvent {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self { path: path.into(), kind }
    }

    /// The path as a forward-slash string, the form glob matching expects.
    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().replace('\\', "/")
    }
}

/// Map a `notify` event kind onto our three change kinds.
///
/// Access events and catch-all kinds are dropped; rename metadata is folded
/// into `Changed` since the coordinator only cares that a rebuild is due.
pub fn classify(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Added),
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(ChangeKind::Changed),
        EventKind::Remove(_) => Some(ChangeKind::Removed),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => None,
    }
}
