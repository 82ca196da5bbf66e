//! Property tests for the query-state codec.
//!
//! Uses proptest to verify:
//! 1. Totality: any parameter map parses into a state whose fields are all valid
//! 2. Round trip: parse(serialize(s)) == s for parsed states with trimmed queries
//! 3. Minimality: serialize never emits a field equal to its default

use proptest::prelude::*;
use std::collections::HashMap;

use runboard_core::query_state::{
    is_allowed_page_size, RunsQueryState, SortBy, SortDir, StatusFilter, DEFAULT_PAGE,
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};
use runboard_core::RunStatus;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_status() -> impl Strategy<Value = StatusFilter> {
    prop_oneof![
        Just(StatusFilter::All),
        prop::sample::select(RunStatus::ALL.to_vec()).prop_map(StatusFilter::Only),
    ]
}

fn arb_query() -> impl Strategy<Value = String> {
    // Trimmed text: surrounding whitespace is the documented lossy case.
    "[a-zA-Z0-9 &=%+?:/_-]{0,24}".prop_map(|s| s.trim().to_string())
}

fn arb_state() -> impl Strategy<Value = RunsQueryState> {
    (
        arb_query(),
        arb_status(),
        prop::sample::select(SortBy::ALL.to_vec()),
        prop::sample::select(SortDir::ALL.to_vec()),
        1u32..10_000,
        prop::sample::select(PAGE_SIZE_OPTIONS.to_vec()),
    )
        .prop_map(|(query, status, sort_by, sort_dir, page, page_size)| RunsQueryState {
            query,
            status,
            sort_by,
            sort_dir,
            page,
            page_size,
        })
}

fn arb_raw_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[-+ ]?[0-9]{1,12}(\\.[0-9]{0,3})?",
        "(all|done|failed|queued|running|DONE|bogus)",
        "(createdAt|maxDD|pf|trades|PF|x)?(:)?(asc|desc|up)?(:extra)?",
        ".{0,12}",
    ]
}

fn arb_params() -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::hash_map(
        prop::sample::select(vec![
            "query".to_string(),
            "status".to_string(),
            "sort".to_string(),
            "page".to_string(),
            "pageSize".to_string(),
            "other".to_string(),
        ]),
        arb_raw_value(),
        0..6,
    )
}

proptest! {
    /// Whatever arrives in the URL, every parsed field is one of its valid values.
    #[test]
    fn parse_is_total(params in arb_params()) {
        let state = RunsQueryState::parse(&params);
        prop_assert!(state.page >= 1);
        prop_assert!(is_allowed_page_size(state.page_size));
        prop_assert_eq!(
            state.query.as_str(),
            params.get("query").map(String::as_str).unwrap_or("")
        );
    }

    #[test]
    fn roundtrip_through_params(state in arb_state()) {
        let params: HashMap<String, String> = state
            .serialize()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        prop_assert_eq!(RunsQueryState::parse(&params), state);
    }

    #[test]
    fn roundtrip_through_query_string(state in arb_state()) {
        let encoded = state.to_query_string();
        prop_assert_eq!(RunsQueryState::parse_query_string(&encoded), state);
    }

    /// Parsing an already-canonical URL and re-serializing it changes nothing.
    #[test]
    fn serialize_is_idempotent(params in arb_params()) {
        let once = RunsQueryState::parse(&params);
        let encoded = once.to_query_string();
        let twice = RunsQueryState::parse_query_string(&encoded);
        prop_assert_eq!(twice.to_query_string(), encoded);
    }

    #[test]
    fn serialize_omits_defaults(state in arb_state()) {
        for (key, value) in state.serialize() {
            match key {
                "query" => prop_assert!(!value.trim().is_empty()),
                "status" => prop_assert_ne!(value.as_str(), "all"),
                "sort" => prop_assert_ne!(value.as_str(), "createdAt:desc"),
                "page" => prop_assert_ne!(value, DEFAULT_PAGE.to_string()),
                "pageSize" => prop_assert_ne!(value, DEFAULT_PAGE_SIZE.to_string()),
                other => prop_assert!(false, "unexpected key {}", other),
            }
        }
    }
}

#[test]
fn documented_invalid_combination_yields_defaults() {
    let state = RunsQueryState::parse_query_string("status=bogus&sort=nonsense&page=-3&pageSize=999");
    assert_eq!(state, RunsQueryState::default());
}

#[test]
fn whitespace_only_query_is_the_lossy_case() {
    let state = RunsQueryState::parse_query_string("query=+++&status=done");
    assert_eq!(state.query, "   ");
    let back = RunsQueryState::parse_query_string(&state.to_query_string());
    assert_eq!(back.query, "");
    assert_eq!(back.status, state.status);
}
