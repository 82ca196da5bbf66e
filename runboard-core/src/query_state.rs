//! List-view query state and its URL encoding.
//!
//! `parse` turns untrusted URL parameters into a `RunsQueryState` where every
//! field holds a valid value: anything missing or malformed falls back to
//! that field's default, independently of the other fields. `serialize`
//! goes the other way and emits only the fields that differ from their
//! defaults, so the canonical URL for the default view has no parameters.
//!
//! Round trip: `parse(serialize(s)) == s` for every parsed state, except that
//! the query is trimmed on the way out (a whitespace-only query disappears).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::str::FromStr;

use crate::domain::{total_pages, ListRunsResult, ParseKindError, RunStatus};

pub const KEY_QUERY: &str = "query";
pub const KEY_STATUS: &str = "status";
pub const KEY_SORT: &str = "sort";
pub const KEY_PAGE: &str = "page";
pub const KEY_PAGE_SIZE: &str = "pageSize";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [10, 20, 50];

const SORT_SEPARATOR: char = ':';

// ─── Field enums ─────────────────────────────────────────────────────

/// Status filter: every run, or only runs in one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(RunStatus),
}

impl StatusFilter {
    pub const ALL_LABEL: &'static str = "all";

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => Self::ALL_LABEL,
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn matches(self, status: RunStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    /// Only a concrete run status is accepted from a URL; `"all"` is the default anyway.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse::<RunStatus>().ok())
            .map(StatusFilter::Only)
            .unwrap_or_default()
    }
}

impl FromStr for StatusFilter {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL_LABEL {
            return Ok(StatusFilter::All);
        }
        s.parse::<RunStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| ParseKindError::new("status filter", s))
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = ParseKindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RunStatus> for StatusFilter {
    fn from(status: RunStatus) -> Self {
        StatusFilter::Only(status)
    }
}

/// Column the listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortBy {
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "maxDD")]
    MaxDd,
    #[serde(rename = "pf")]
    Pf,
    #[serde(rename = "trades")]
    Trades,
}

impl SortBy {
    pub const ALL: [SortBy; 4] = [SortBy::CreatedAt, SortBy::MaxDd, SortBy::Pf, SortBy::Trades];

    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::CreatedAt => "createdAt",
            SortBy::MaxDd => "maxDD",
            SortBy::Pf => "pf",
            SortBy::Trades => "trades",
        }
    }

    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for SortBy {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseKindError::new("sort key", s))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl SortDir {
    pub const ALL: [SortDir; 2] = [SortDir::Asc, SortDir::Desc];

    pub fn as_str(self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for SortDir {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortDir::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseKindError::new("sort direction", s))
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(StatusFilter, SortBy, SortDir);

/// Parse a `"<sortBy>:<sortDir>"` token. Both halves must be valid, or both
/// fall back to their defaults.
pub fn parse_sort_token(token: Option<&str>) -> (SortBy, SortDir) {
    let parsed = token.and_then(|t| {
        let mut parts = t.split(SORT_SEPARATOR);
        let by = parts.next()?.parse::<SortBy>().ok()?;
        let dir = parts.next()?.parse::<SortDir>().ok()?;
        Some((by, dir))
    });
    parsed.unwrap_or_default()
}

pub fn sort_token(sort_by: SortBy, sort_dir: SortDir) -> String {
    format!("{sort_by}{SORT_SEPARATOR}{sort_dir}")
}

// ─── Parameter sources ───────────────────────────────────────────────

/// Read access to raw URL parameters by key.
pub trait ParamSource {
    fn param(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> ParamSource for HashMap<String, String, S> {
    fn param(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl ParamSource for BTreeMap<String, String> {
    fn param(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Ordered pairs, as decoded from a query string. The first occurrence wins.
impl ParamSource for [(String, String)] {
    fn param(&self, key: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl ParamSource for Vec<(String, String)> {
    fn param(&self, key: &str) -> Option<&str> {
        self.as_slice().param(key)
    }
}

// ─── State ───────────────────────────────────────────────────────────

/// Canonical filter/sort/pagination intent of the run list view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunsQueryState {
    /// Free text as typed; trimmed only when matching or serializing.
    pub query: String,
    pub status: StatusFilter,
    pub sort_by: SortBy,
    pub sort_dir: SortDir,
    pub page: u32,
    pub page_size: u32,
}

impl Default for RunsQueryState {
    fn default() -> Self {
        Self {
            query: String::new(),
            status: StatusFilter::All,
            sort_by: SortBy::default(),
            sort_dir: SortDir::default(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RunsQueryState {
    /// Parse raw URL parameters. Never fails; each field degrades to its default.
    pub fn parse<P: ParamSource + ?Sized>(params: &P) -> Self {
        let (sort_by, sort_dir) = parse_sort_token(params.param(KEY_SORT));
        let page_size = coerce_page_size(parse_positive_int(
            params.param(KEY_PAGE_SIZE),
            DEFAULT_PAGE_SIZE,
        ));

        Self {
            query: params.param(KEY_QUERY).unwrap_or_default().to_string(),
            status: StatusFilter::parse_or_default(params.param(KEY_STATUS)),
            sort_by,
            sort_dir,
            page: parse_positive_int(params.param(KEY_PAGE), DEFAULT_PAGE),
            page_size,
        }
    }

    /// Decode a URL query string (a leading `?` is allowed) and parse it.
    pub fn parse_query_string(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(raw.as_bytes())
            .into_owned()
            .collect();
        Self::parse(&pairs)
    }

    /// Minimal parameters for this state, in the order
    /// query, status, sort, page, pageSize. Defaults are omitted.
    pub fn serialize(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        let trimmed = self.query.trim();
        if !trimmed.is_empty() {
            params.push((KEY_QUERY, trimmed.to_string()));
        }
        if self.status != StatusFilter::All {
            params.push((KEY_STATUS, self.status.to_string()));
        }
        if (self.sort_by, self.sort_dir) != (SortBy::default(), SortDir::default()) {
            params.push((KEY_SORT, sort_token(self.sort_by, self.sort_dir)));
        }
        if self.page != DEFAULT_PAGE {
            params.push((KEY_PAGE, self.page.to_string()));
        }
        if self.page_size != DEFAULT_PAGE_SIZE {
            params.push((KEY_PAGE_SIZE, self.page_size.to_string()));
        }

        params
    }

    /// `serialize` encoded as a query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut encoder = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.serialize() {
            encoder.append_pair(key, &value);
        }
        encoder.finish()
    }

    /// Lowercased, trimmed query used for matching.
    pub fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }

    // ── Transitions: any filter change sends the view back to page 1 ──

    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    pub fn with_status(&self, status: StatusFilter) -> Self {
        Self {
            status,
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort_by: SortBy, sort_dir: SortDir) -> Self {
        Self {
            sort_by,
            sort_dir,
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    /// Sizes outside `PAGE_SIZE_OPTIONS` become the default size.
    pub fn with_page_size(&self, page_size: u32) -> Self {
        Self {
            page_size: coerce_page_size(page_size),
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(DEFAULT_PAGE),
            ..self.clone()
        }
    }

    /// State to write back when the service served a different page or size
    /// than requested (for example a page past the end, clamped to the last).
    pub fn reconcile(&self, served: &ListRunsResult) -> Option<Self> {
        if served.page == self.page && served.page_size == self.page_size {
            return None;
        }
        Some(Self {
            page: served.page,
            page_size: served.page_size,
            ..self.clone()
        })
    }

    pub fn total_pages(&self, total: usize) -> u32 {
        total_pages(total, self.page_size)
    }
}

pub fn is_allowed_page_size(page_size: u32) -> bool {
    PAGE_SIZE_OPTIONS.contains(&page_size)
}

fn coerce_page_size(page_size: u32) -> u32 {
    if is_allowed_page_size(page_size) {
        page_size
    } else {
        DEFAULT_PAGE_SIZE
    }
}

/// Leading-integer parse with a fallback for absent, unparseable, or < 1 input.
fn parse_positive_int(raw: Option<&str>, fallback: u32) -> u32 {
    match raw.and_then(parse_leading_int) {
        Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => fallback,
    }
}

/// Skips leading whitespace, accepts one sign, then reads digits up to the
/// first non-digit: `"3.7"` is 3, `"12abc"` is 12, `"abc"` is `None`.
/// Saturates instead of overflowing.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    seen_digit.then_some(if negative { -value } else { value })
}
