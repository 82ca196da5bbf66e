//! Stale-response tagging for overlapping requests.
//!
//! When a newer listing supersedes one still in flight, the older response
//! must be dropped rather than rendered. Callers tag each request with
//! `begin()` and pass the response through `accept()`.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued request. Later tags compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTag(u64);

impl RequestTag {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a tag that supersedes every earlier one.
    pub fn begin(&self) -> RequestTag {
        RequestTag(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, tag: RequestTag) -> bool {
        self.latest.load(Ordering::Acquire) == tag.0
    }

    /// `Some(value)` only if no newer request was issued since `tag`.
    pub fn accept<T>(&self, tag: RequestTag, value: T) -> Option<T> {
        self.is_current(tag).then_some(value)
    }
}
