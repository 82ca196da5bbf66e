//! Synthetic performance metrics for newly created runs.
//!
//! Metrics are a pure function of the creation input: the input fields are
//! hashed into a seed, the seed drives a fixed sequence of draws, and the
//! draws are scaled and clamped into realistic ranges.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::input::CreateRunInput;
use crate::rng::{rng_for, seed_from_parts};

pub const PF_MIN: f64 = 0.65;
pub const PF_MAX: f64 = 2.2;
pub const MAX_DD_CAP: f64 = 0.35;
pub const MIN_TRADES: u32 = 8;

/// Derived metrics attached to a run at creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub pf: f64,
    pub trades: u32,
    pub max_dd: f64,
}

/// Seed for an input: hash of `pair:timeframe:start:end:strategy:risk`.
pub fn metrics_seed(input: &CreateRunInput) -> u64 {
    let start = input.start_date.to_string();
    let end = input.end_date.to_string();
    let risk = input.risk_pct.to_string();
    seed_from_parts(&[
        input.pair.as_str(),
        input.timeframe.as_str(),
        &start,
        &end,
        input.strategy.as_str(),
        &risk,
    ])
}

/// Derive `pf`, `trades`, and `max_dd` for an input.
pub fn derive_metrics(input: &CreateRunInput) -> DerivedMetrics {
    let mut rng = rng_for(metrics_seed(input));
    let pf_step: u32 = rng.gen_range(0..95);
    let trade_step: u32 = rng.gen_range(0..70);
    let dd_step: u32 = rng.gen_range(0..11);

    let pf = round_to(
        (0.95 + f64::from(pf_step) / 100.0).clamp(PF_MIN, PF_MAX),
        2,
    );

    let scaled_trades = (f64::from(trade_step + 12) * input.timeframe.trade_multiplier()).round();
    let trades = (scaled_trades as u32).max(MIN_TRADES);

    let base_dd = 0.03 + f64::from(dd_step) / 100.0;
    let risk_factor = input.risk_pct / 100.0;
    let max_dd = round_to((base_dd + risk_factor * 8.0).clamp(0.0, MAX_DD_CAP), 3);

    DerivedMetrics { pf, trades, max_dd }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
