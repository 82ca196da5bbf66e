use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::RunId;
use super::kinds::{Pair, RunStatus, Strategy, Timeframe};

/// One backtest execution with its derived performance metrics.
///
/// Records are immutable once created. Field names on the wire follow the
/// dashboard's JSON shape (`startDate`, `riskPct`, `maxDD`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: RunId,
    pub pair: Pair,
    pub timeframe: Timeframe,
    pub strategy: Strategy,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub risk_pct: f64,
    /// Profit factor.
    pub pf: f64,
    pub trades: u32,
    /// Maximum drawdown as a fraction (0.12 = 12%).
    #[serde(rename = "maxDD")]
    pub max_dd: f64,
    pub status: RunStatus,
    pub created_at: DateTime<Utc>,
}

impl Run {
    /// True if the lowercased needle occurs in the pair, timeframe, or status.
    ///
    /// `needle` must already be lowercased; an empty needle matches everything.
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        [
            self.pair.as_str(),
            self.timeframe.as_str(),
            self.status.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}
