//! Deterministic sample collection used to seed the mock service.
//!
//! Produces 36 runs covering every pair, timeframe, strategy, and status.
//! Metrics come from the same synthesis used for newly created runs.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::domain::{Pair, Run, RunId, RunStatus, Strategy, Timeframe};
use crate::input::CreateRunInput;
use crate::metrics::derive_metrics;

pub const SAMPLE_RUN_COUNT: usize = 36;

const STATUS_CYCLE: [RunStatus; 9] = [
    RunStatus::Done,
    RunStatus::Done,
    RunStatus::Running,
    RunStatus::Done,
    RunStatus::Failed,
    RunStatus::Done,
    RunStatus::Queued,
    RunStatus::Done,
    RunStatus::Done,
];

const RISK_CYCLE: [f64; 5] = [0.25, 0.5, 0.75, 1.0, 1.5];

/// Sample runs, newest first (`RUN-036` .. `RUN-001`).
pub fn sample_runs() -> Vec<Run> {
    let mut runs: Vec<Run> = (0..SAMPLE_RUN_COUNT).map(sample_run).collect();
    runs.reverse();
    runs
}

fn sample_run(index: usize) -> Run {
    let timeframe = Timeframe::ALL[index % Timeframe::ALL.len()];
    let start_date = base_start_date() + Duration::days(17 * index as i64);
    let input = CreateRunInput {
        pair: Pair::ALL[index % Pair::ALL.len()],
        timeframe,
        start_date,
        end_date: start_date + Duration::days(window_days(timeframe)),
        strategy: Strategy::ALL[index % Strategy::ALL.len()],
        risk_pct: RISK_CYCLE[index % RISK_CYCLE.len()],
    };
    let metrics = derive_metrics(&input);

    Run {
        id: RunId::from_number(index as u64 + 1),
        pair: input.pair,
        timeframe: input.timeframe,
        strategy: input.strategy,
        start_date: input.start_date,
        end_date: input.end_date,
        risk_pct: input.risk_pct,
        pf: metrics.pf,
        trades: metrics.trades,
        max_dd: metrics.max_dd,
        status: STATUS_CYCLE[index % STATUS_CYCLE.len()],
        created_at: base_created_at() + Duration::hours(index as i64),
    }
}

fn window_days(timeframe: Timeframe) -> i64 {
    match timeframe {
        Timeframe::M15 => 60,
        Timeframe::H1 => 120,
        Timeframe::H4 => 365,
        Timeframe::D1 => 730,
    }
}

fn base_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap_or(NaiveDate::MIN)
}

fn base_created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_is_deterministic() {
        assert_eq!(sample_runs(), sample_runs());
    }

    #[test]
    fn ids_are_unique_and_newest_first() {
        let runs = sample_runs();
        assert_eq!(runs.len(), SAMPLE_RUN_COUNT);
        let ids: HashSet<_> = runs.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), SAMPLE_RUN_COUNT);
        assert_eq!(runs[0].id.as_str(), "RUN-036");
        assert_eq!(runs[35].id.as_str(), "RUN-001");
        assert!(runs.windows(2).all(|w| w[0].created_at > w[1].created_at));
    }

    #[test]
    fn every_kind_is_represented() {
        let runs = sample_runs();
        for pair in Pair::ALL {
            assert!(runs.iter().any(|r| r.pair == pair), "{pair}");
        }
        for tf in Timeframe::ALL {
            assert!(runs.iter().any(|r| r.timeframe == tf), "{tf}");
        }
        for status in RunStatus::ALL {
            assert!(runs.iter().any(|r| r.status == status), "{status}");
        }
    }

    #[test]
    fn end_after_start() {
        assert!(sample_runs().iter().all(|r| r.end_date > r.start_date));
    }
}
