//! Runboard Service — mock run listing backed by an in-process store.
//!
//! This crate builds on `runboard-core` to provide:
//! - An injectable run store (`RunStore`) with an in-memory implementation
//! - The pure filter/sort/paginate pass over a run collection
//! - Simulated latency and forced/random failure injection
//! - The async `RunService`: list, get-by-id, create
//! - Stale-response tagging for overlapping requests
//! - TOML-backed service configuration

pub mod config;
pub mod error;
pub mod listing;
pub mod request;
pub mod service;
pub mod simulation;
pub mod store;

pub use config::{ConfigError, ServiceConfig, SimulationConfig};
pub use error::ServiceError;
pub use listing::{query_runs, ListRunsRequest};
pub use request::{RequestTag, RequestTracker};
pub use service::RunService;
pub use store::{InMemoryRunStore, RunStore};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn service_is_send_sync() {
        assert_send::<RunService>();
        assert_sync::<RunService>();
    }

    #[test]
    fn tracker_is_send_sync() {
        assert_send::<RequestTracker>();
        assert_sync::<RequestTracker>();
    }

    #[test]
    fn list_future_is_send() {
        fn require_send<F: std::future::Future + Send>(_: F) {}
        let service = RunService::in_memory(&ServiceConfig::instant());
        let request = ListRunsRequest::default();
        require_send(service.list(&request));
    }

    #[test]
    fn create_future_is_send() {
        fn require_send<F: std::future::Future + Send>(_: F) {}
        let service = RunService::in_memory(&ServiceConfig::instant());
        let input = runboard_core::RunPreset::QuickDemo
            .input(chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        require_send(service.create(&input, None));
    }
}
