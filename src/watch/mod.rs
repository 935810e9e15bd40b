// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Typing raw `notify` events as `WatchEvent`s (`event.rs`).
//! - Compiling watch / exclude glob patterns (`patterns.rs`).
//! - Wiring up a cross-platform filesystem watcher and routing events to the
//!   pipeline coordinators (`watcher.rs`).
//!
//! It does **not** know about pipelines or coalescing; it only turns
//! filesystem changes into typed, routed events.

pub mod event;
pub mod patterns;
pub mod watcher;

pub use event::{classify, ChangeKind, WatchEvent};
pub use patterns::{ExcludeSet, WatchGlob};
pub use watcher::{spawn_watcher, WatcherHandle, WatchRoute};
