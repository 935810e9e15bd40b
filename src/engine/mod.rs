// src/engine/mod.rs

//! Orchestration engine for buildwatch.
//!
//! This module ties together:
//! - the coalescing depth counter bounding compiles per pipeline (`depth`)
//! - the per-pipeline rebuild coordinator event loop (`coordinator`)
//! - the strictly sequential initial build (`orchestrator`)

pub mod coordinator;
pub mod depth;
pub mod orchestrator;

pub use coordinator::{CoordinatorEvent, CoordinatorOptions, RebuildCoordinator};
pub use depth::{CompleteAction, EventAction, PendingDepth};
pub use orchestrator::{Orchestrator, Step};
