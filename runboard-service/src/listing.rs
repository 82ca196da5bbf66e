//! Filter, sort, and paginate a run collection.
//!
//! Pure and synchronous; the async service wraps it with latency and
//! failure simulation.

use std::cmp::Ordering;

use runboard_core::domain::{ListRunsResult, Run};
use runboard_core::query_state::{
    RunsQueryState, SortBy, SortDir, StatusFilter, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};

/// Parameters for one listing call.
///
/// Unlike `RunsQueryState`, `page_size` may be any positive size.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRunsRequest {
    pub query: String,
    pub status: StatusFilter,
    pub sort_by: SortBy,
    pub sort_dir: SortDir,
    pub page: u32,
    pub page_size: u32,
    /// `Some(true)` always fails, `Some(false)` never fails, `None` draws at random.
    pub force_error: Option<bool>,
}

impl Default for ListRunsRequest {
    fn default() -> Self {
        Self::from(&RunsQueryState::default())
    }
}

impl From<&RunsQueryState> for ListRunsRequest {
    fn from(state: &RunsQueryState) -> Self {
        Self {
            query: state.query.clone(),
            status: state.status,
            sort_by: state.sort_by,
            sort_dir: state.sort_dir,
            page: state.page,
            page_size: state.page_size,
            force_error: None,
        }
    }
}

impl ListRunsRequest {
    pub fn with_force_error(mut self, force_error: Option<bool>) -> Self {
        self.force_error = force_error;
        self
    }

    /// Page, with 0 treated as the first page.
    pub fn effective_page(&self) -> u32 {
        self.page.max(DEFAULT_PAGE)
    }

    /// Page size, with 0 treated as the default size.
    pub fn effective_page_size(&self) -> u32 {
        if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }
}

/// Ascending comparison on one sort key. Floats use the IEEE total order,
/// so NaN metrics sort after every finite value.
pub fn compare_runs(a: &Run, b: &Run, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
        SortBy::MaxDd => a.max_dd.total_cmp(&b.max_dd),
        SortBy::Pf => a.pf.total_cmp(&b.pf),
        SortBy::Trades => a.trades.cmp(&b.trades),
    }
}

/// Stable sort. Descending flips the comparator, not the sequence, so ties
/// keep their input order in both directions.
pub fn sort_runs(runs: &mut [Run], sort_by: SortBy, sort_dir: SortDir) {
    runs.sort_by(|a, b| {
        let ord = compare_runs(a, b, sort_by);
        match sort_dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
}

/// Filter by status and text, sort, clamp the page, and slice it out.
pub fn query_runs(runs: &[Run], request: &ListRunsRequest) -> ListRunsResult {
    let needle = request.query.trim().to_lowercase();
    let mut matching: Vec<Run> = runs
        .iter()
        .filter(|run| request.status.matches(run.status) && run.matches_text(&needle))
        .cloned()
        .collect();

    sort_runs(&mut matching, request.sort_by, request.sort_dir);

    let page_size = request.effective_page_size();
    let total = matching.len();
    let last_page = runboard_core::domain::total_pages(total, page_size);
    let page = request.effective_page().clamp(DEFAULT_PAGE, last_page);

    let start = (page as usize - 1).saturating_mul(page_size as usize);
    let items: Vec<Run> = matching
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();

    ListRunsResult {
        items,
        page,
        page_size,
        total,
    }
}
