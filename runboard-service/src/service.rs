//! The mock run service: list, look up, and create runs.
//!
//! Every operation first waits one simulated round trip, then decides
//! whether to fail, and only then touches the store. The store lock is never
//! held across an await point, so overlapping calls are independent.

use chrono::Utc;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

use runboard_core::domain::{next_run_id, ListRunsResult, Run, RunStatus};
use runboard_core::input::CreateRunInput;
use runboard_core::metrics::derive_metrics;
use runboard_core::sample_data::sample_runs;

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::listing::{query_runs, ListRunsRequest};
use crate::simulation::{RandomFailures, Simulation};
use crate::store::{InMemoryRunStore, RunStore};

pub struct RunService<S = InMemoryRunStore> {
    store: S,
    simulation: Simulation,
    create_failures: RandomFailures,
    // Serializes id assignment with the insert that uses it.
    create_lock: Mutex<()>,
}

impl RunService<InMemoryRunStore> {
    /// Service over an empty in-memory store.
    pub fn in_memory(config: &ServiceConfig) -> Self {
        Self::new(InMemoryRunStore::new(), config)
    }

    /// Service over an in-memory store seeded with the sample collection.
    pub fn with_sample_data(config: &ServiceConfig) -> Self {
        Self::new(InMemoryRunStore::with_runs(sample_runs()), config)
    }
}

impl<S: RunStore> RunService<S> {
    pub fn new(store: S, config: &ServiceConfig) -> Self {
        let create_failures = if config.simulation.random_create_failures {
            RandomFailures::Enabled
        } else {
            RandomFailures::Disabled
        };
        Self {
            store,
            simulation: Simulation::new(config.simulation.clone()),
            create_failures,
            create_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Filtered, sorted page of runs.
    pub async fn list(&self, request: &ListRunsRequest) -> Result<ListRunsResult, ServiceError> {
        self.simulation.wait().await;

        if self
            .simulation
            .should_fail(request.force_error, RandomFailures::Enabled)
        {
            warn!(forced = ?request.force_error, "list runs failed");
            return Err(ServiceError::ListUnavailable);
        }

        let result = query_runs(&self.store.read(), request);
        debug!(
            page = result.page,
            page_size = result.page_size,
            total = result.total,
            returned = result.items.len(),
            "listed runs"
        );
        Ok(result)
    }

    /// Look up one run. `Ok(None)` means the id does not exist.
    pub async fn get_by_id(
        &self,
        id: &str,
        force_error: Option<bool>,
    ) -> Result<Option<Run>, ServiceError> {
        self.simulation.wait().await;

        if self
            .simulation
            .should_fail(force_error, RandomFailures::Enabled)
        {
            warn!(id, forced = ?force_error, "run lookup failed");
            return Err(ServiceError::DetailUnavailable);
        }

        let found = self.store.find(id);
        debug!(id, found = found.is_some(), "looked up run");
        Ok(found)
    }

    /// Create a queued run with derived metrics and prepend it to the store.
    ///
    /// The input is not validated here; see `CreateRunInput::validate`.
    pub async fn create(
        &self,
        input: &CreateRunInput,
        force_error: Option<bool>,
    ) -> Result<Run, ServiceError> {
        self.simulation.wait().await;

        if self.simulation.should_fail(force_error, self.create_failures) {
            warn!(forced = ?force_error, "create run failed");
            return Err(ServiceError::CreateUnavailable);
        }

        let metrics = derive_metrics(input);
        let run = {
            let _guard = self
                .create_lock
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let run = Run {
                id: next_run_id(&self.store.read()),
                pair: input.pair,
                timeframe: input.timeframe,
                strategy: input.strategy,
                start_date: input.start_date,
                end_date: input.end_date,
                risk_pct: input.risk_pct,
                pf: metrics.pf,
                trades: metrics.trades,
                max_dd: metrics.max_dd,
                status: RunStatus::Queued,
                created_at: Utc::now(),
            };
            self.store.append(run.clone());
            run
        };

        info!(
            id = %run.id,
            pair = %run.pair,
            timeframe = %run.timeframe,
            pf = run.pf,
            trades = run.trades,
            max_dd = run.max_dd,
            "created run"
        );
        Ok(run)
    }
}
