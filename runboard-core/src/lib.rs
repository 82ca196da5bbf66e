//! Runboard Core — run records, list query state, deterministic metrics.
//!
//! This crate holds everything that is a pure function of its inputs:
//! - Domain types (runs, ids, pairs, timeframes, strategies, statuses)
//! - Query-state codec: URL parameters ⇄ canonical filter/sort/page state
//! - Hash-seeded metric synthesis for newly created runs
//! - Creation input validation and presets
//! - Display formatting and a deterministic sample collection

pub mod domain;
pub mod format;
pub mod input;
pub mod metrics;
pub mod query_state;
pub mod rng;
pub mod sample_data;

pub use domain::{ListRunsResult, Pair, Run, RunId, RunStatus, Strategy, Timeframe};
pub use input::{CreateRunInput, RunPreset, ValidationError};
pub use metrics::{derive_metrics, DerivedMetrics};
pub use query_state::{RunsQueryState, SortBy, SortDir, StatusFilter};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn domain_types_are_send_sync() {
        assert_send::<Run>();
        assert_sync::<Run>();
        assert_send::<RunId>();
        assert_sync::<RunId>();
        assert_send::<ListRunsResult>();
        assert_sync::<ListRunsResult>();
    }

    #[test]
    fn query_state_is_send_sync() {
        assert_send::<RunsQueryState>();
        assert_sync::<RunsQueryState>();
    }

    #[test]
    fn input_is_send_sync() {
        assert_send::<CreateRunInput>();
        assert_sync::<CreateRunInput>();
    }
}
