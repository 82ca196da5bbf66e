use serde::{Deserialize, Serialize};

use super::run::Run;

/// One served page of a run listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRunsResult {
    /// At most `page_size` records, in sorted order.
    pub items: Vec<Run>,
    /// Page actually served, after clamping into `[1, total_pages]`.
    pub page: u32,
    pub page_size: u32,
    /// Records matching the filters, before pagination.
    pub total: usize,
}

impl ListRunsResult {
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.page_size)
    }
}

/// `max(1, ceil(total / page_size))`. A zero page size counts as one page.
pub fn total_pages(total: usize, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total.div_ceil(page_size as usize).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listing_has_one_page() {
        assert_eq!(total_pages(0, 10), 1);
    }

    #[test]
    fn partial_last_page_counts() {
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(36, 5), 8);
    }

    #[test]
    fn zero_page_size_is_one_page() {
        assert_eq!(total_pages(50, 0), 1);
    }
}
