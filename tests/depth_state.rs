// tests/depth_state.rs

//! The coalescing counter in isolation: transitions, bounds, convergence.

use buildwatch::engine::{CompleteAction, EventAction, PendingDepth};
use proptest::prelude::*;

#[test]
fn idle_event_starts_a_run() {
    let mut depth = PendingDepth::new();
    assert!(depth.is_idle());
    assert_eq!(depth.on_event(), EventAction::Start);
    assert_eq!(depth.get(), 1);
}

#[test]
fn event_during_run_queues_one_rerun() {
    let mut depth = PendingDepth::new();
    depth.on_event();
    assert_eq!(depth.on_event(), EventAction::Queued);
    assert_eq!(depth.get(), 2);
}

#[test]
fn events_beyond_the_queued_rerun_coalesce() {
    let mut depth = PendingDepth::new();
    depth.on_event();
    depth.on_event();
    for _ in 0..100 {
        assert_eq!(depth.on_event(), EventAction::Coalesced);
        assert_eq!(depth.get(), 2);
    }
}

#[test]
fn completion_with_queued_rerun_starts_it() {
    let mut depth = PendingDepth::new();
    depth.on_event();
    depth.on_event();
    assert_eq!(depth.on_complete(), CompleteAction::StartNext);
    assert_eq!(depth.get(), 1);
    assert_eq!(depth.on_complete(), CompleteAction::Idle);
    assert!(depth.is_idle());
}

#[test]
fn completion_without_queue_goes_idle() {
    let mut depth = PendingDepth::new();
    depth.on_event();
    assert_eq!(depth.on_complete(), CompleteAction::Idle);
    assert!(depth.is_idle());
}

/// Drive a burst of N events against an idle counter, then complete runs
/// until idle, counting how many runs were started in total.
fn runs_for_burst(n: usize) -> usize {
    let mut depth = PendingDepth::new();
    let mut started = 0;

    for _ in 0..n {
        if depth.on_event() == EventAction::Start {
            started += 1;
        }
        assert!(depth.get() <= 2);
    }

    while !depth.is_idle() {
        if depth.on_complete() == CompleteAction::StartNext {
            started += 1;
        }
        assert!(depth.get() <= 2);
    }

    started
}

proptest! {
    /// Any burst while idle converges in at most 2 compiles, independent of N.
    #[test]
    fn burst_converges_in_at_most_two_runs(n in 1usize..500) {
        let started = runs_for_burst(n);
        prop_assert!(started >= 1);
        prop_assert!(started <= 2);
    }

    /// Any valid interleaving of events and completions keeps the depth in
    /// {0, 1, 2} and balances starts against completions.
    #[test]
    fn depth_stays_bounded_under_interleaving(ops in proptest::collection::vec(any::<bool>(), 0..200)) {
        let mut depth = PendingDepth::new();
        let mut outstanding = 0usize;

        for is_event in ops {
            if is_event {
                if depth.on_event() == EventAction::Start {
                    outstanding += 1;
                }
            } else if outstanding > 0 {
                // A completion can only arrive while a run is outstanding.
                match depth.on_complete() {
                    CompleteAction::StartNext => {} // rerun replaces the completed run
                    CompleteAction::Idle => outstanding -= 1,
                }
            }

            prop_assert!(depth.get() <= 2);
            // At most one run is ever outstanding.
            prop_assert!(outstanding <= 1);
        }
    }
}
