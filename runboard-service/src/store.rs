//! Backing collection for the run service.
//!
//! Stands in for a database table. Tests build their own store so no state
//! is shared between cases.

use std::sync::{PoisonError, RwLock};

use runboard_core::domain::Run;

/// Storage seam for run records.
pub trait RunStore: Send + Sync {
    /// Snapshot of every record, newest first.
    fn read(&self) -> Vec<Run>;

    /// Add a record as the newest entry.
    fn append(&self, run: Run);

    fn find(&self, id: &str) -> Option<Run> {
        self.read().into_iter().find(|run| run.id.as_str() == id)
    }

    fn len(&self) -> usize {
        self.read().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process store. Keeps records newest-first.
#[derive(Debug, Default)]
pub struct InMemoryRunStore {
    runs: RwLock<Vec<Run>>,
}

impl InMemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `runs`, which should already be newest-first.
    pub fn with_runs(runs: Vec<Run>) -> Self {
        Self {
            runs: RwLock::new(runs),
        }
    }
}

impl RunStore for InMemoryRunStore {
    fn read(&self) -> Vec<Run> {
        self.runs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn append(&self, run: Run) {
        self.runs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, run);
    }

    fn find(&self, id: &str) -> Option<Run> {
        self.runs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|run| run.id.as_str() == id)
            .cloned()
    }

    fn len(&self) -> usize {
        self.runs.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
