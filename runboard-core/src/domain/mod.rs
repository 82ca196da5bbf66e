//! Domain types: run records, identifiers, listing pages, and the closed
//! enumerations that appear on run records.

pub mod ids;
pub mod kinds;
pub mod page;
pub mod run;

pub use ids::{next_run_id, RunId, RUN_ID_FLOOR, RUN_ID_PREFIX};
pub use kinds::{Pair, ParseKindError, RunStatus, Strategy, Timeframe};
pub use page::{total_pages, ListRunsResult};
pub use run::Run;
