// src/engine/depth.rs

use tracing::debug;

/// Coalescing counter for one pipeline.
///
/// The depth is the number of compiles either running or guaranteed to run
/// next: 0 = idle, 1 = one running, 2 = one running plus exactly one queued
/// rerun. It is never negative and never exceeds 2. Any events past the
/// second are folded into the already-queued rerun, with no identity of
/// their own.
///
/// This is a trailing-edge debounce with a hard cap of one pending rerun: a
/// burst of N events against an idle pipeline costs at most 2 compiles, and
/// the final state of the source tree is always reflected by a completed run
/// (the queued rerun starts after the active one finishes, so it sees every
/// change the burst made).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingDepth {
    depth: u8,
}

/// What the caller should do after recording an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    /// The pipeline was idle: start a run now.
    Start,
    /// A run is active: one rerun is now queued behind it.
    Queued,
    /// A rerun was already queued: the event is coalesced into it.
    Coalesced,
}

/// What the caller should do after recording a run completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompleteAction {
    /// A rerun was queued: start it now.
    StartNext,
    /// Nothing queued: the pipeline is idle.
    Idle,
}

impl PendingDepth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u8 {
        self.depth
    }

    pub fn is_idle(&self) -> bool {
        self.depth == 0
    }

    /// Record one accepted watch event.
    pub fn on_event(&mut self) -> EventAction {
        match self.depth {
            0 => {
                self.depth = 1;
                EventAction::Start
            }
            1 => {
                self.depth = 2;
                EventAction::Queued
            }
            _ => {
                debug!("event coalesced into queued rerun");
                EventAction::Coalesced
            }
        }
    }

    /// Record the completion of the active run, success or failure alike.
    ///
    /// Failures take the same transition as successes so a broken compile can
    /// never leave the pipeline stuck above depth 0.
    pub fn on_complete(&mut self) -> CompleteAction {
        debug_assert!(self.depth > 0, "completion with no run outstanding");
        match self.depth {
            2 => {
                self.depth = 1;
                CompleteAction::StartNext
            }
            _ => {
                self.depth = 0;
                CompleteAction::Idle
            }
        }
    }
}
