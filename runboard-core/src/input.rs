//! Run-creation input, caller-side validation, and named presets.

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::{Pair, ParseKindError, Strategy, Timeframe};

pub const RISK_PCT_MIN: f64 = 0.1;
pub const RISK_PCT_MAX: f64 = 2.0;

/// Fields a caller supplies to create a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRunInput {
    pub pair: Pair,
    pub timeframe: Timeframe,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub strategy: Strategy,
    pub risk_pct: f64,
}

/// A single problem with a creation input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("risk % must be a number")]
    RiskNotFinite,
    #[error("risk % must be at least 0.1, got {0}")]
    RiskTooLow(f64),
    #[error("risk % cannot exceed 2.0, got {0}")]
    RiskTooHigh(f64),
    #[error("end date must be after start date ({start} .. {end})")]
    EndNotAfterStart { start: NaiveDate, end: NaiveDate },
}

impl CreateRunInput {
    /// Check the input the way the creation form does. Every issue is reported.
    ///
    /// The service never calls this; creating an unvalidated input is allowed.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !self.risk_pct.is_finite() {
            errors.push(ValidationError::RiskNotFinite);
        } else if self.risk_pct < RISK_PCT_MIN {
            errors.push(ValidationError::RiskTooLow(self.risk_pct));
        } else if self.risk_pct > RISK_PCT_MAX {
            errors.push(ValidationError::RiskTooHigh(self.risk_pct));
        }

        if self.end_date <= self.start_date {
            errors.push(ValidationError::EndNotAfterStart {
                start: self.start_date,
                end: self.end_date,
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Named starting points for a new run, all ending on a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPreset {
    QuickDemo,
    Conservative,
    HigherActivity,
    TrendFocus,
    MeanReversionTest,
}

impl RunPreset {
    pub const ALL: [RunPreset; 5] = [
        RunPreset::QuickDemo,
        RunPreset::Conservative,
        RunPreset::HigherActivity,
        RunPreset::TrendFocus,
        RunPreset::MeanReversionTest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RunPreset::QuickDemo => "quick_demo",
            RunPreset::Conservative => "conservative",
            RunPreset::HigherActivity => "higher_activity",
            RunPreset::TrendFocus => "trend_focus",
            RunPreset::MeanReversionTest => "mean_reversion_test",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RunPreset::QuickDemo => "Quick Demo (H1, last 90d, 0.5%)",
            RunPreset::Conservative => "Conservative (D1, 2y, 0.25%)",
            RunPreset::HigherActivity => "Higher Activity (M15, 60d, 0.5%)",
            RunPreset::TrendFocus => "Trend Focus (H4, 1y, 0.5%, momentum)",
            RunPreset::MeanReversionTest => "Mean Reversion Test (H1, 180d, 0.5%)",
        }
    }

    /// Build the input for this preset, ending on `reference`.
    pub fn input(self, reference: NaiveDate) -> CreateRunInput {
        let (pair, timeframe, strategy, risk_pct, start_date) = match self {
            RunPreset::QuickDemo => (
                Pair::EurUsd,
                Timeframe::H1,
                Strategy::Breakout,
                0.5,
                days_before(reference, 90),
            ),
            RunPreset::Conservative => (
                Pair::UsdCad,
                Timeframe::D1,
                Strategy::Momentum,
                0.25,
                years_before(reference, 2),
            ),
            RunPreset::HigherActivity => (
                Pair::GbpUsd,
                Timeframe::M15,
                Strategy::Breakout,
                0.5,
                days_before(reference, 60),
            ),
            RunPreset::TrendFocus => (
                Pair::UsdJpy,
                Timeframe::H4,
                Strategy::Momentum,
                0.5,
                years_before(reference, 1),
            ),
            RunPreset::MeanReversionTest => (
                Pair::AudUsd,
                Timeframe::H1,
                Strategy::MeanReversion,
                0.5,
                days_before(reference, 180),
            ),
        };

        CreateRunInput {
            pair,
            timeframe,
            start_date,
            end_date: reference,
            strategy,
            risk_pct,
        }
    }
}

impl fmt::Display for RunPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunPreset {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RunPreset::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseKindError::new("preset", s))
    }
}

fn days_before(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_sub_signed(Duration::days(days)).unwrap_or(date)
}

// Feb 29 falls back to Feb 28 in non-leap years.
fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(12 * years))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn valid() -> CreateRunInput {
        CreateRunInput {
            pair: Pair::EurUsd,
            timeframe: Timeframe::H1,
            start_date: d(2024, 1, 1),
            end_date: d(2024, 3, 1),
            strategy: Strategy::Breakout,
            risk_pct: 0.5,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn risk_bounds_are_inclusive() {
        let mut input = valid();
        input.risk_pct = RISK_PCT_MIN;
        assert!(input.validate().is_ok());
        input.risk_pct = RISK_PCT_MAX;
        assert!(input.validate().is_ok());
        input.risk_pct = 2.01;
        assert_eq!(input.validate(), Err(vec![ValidationError::RiskTooHigh(2.01)]));
        input.risk_pct = 0.05;
        assert_eq!(input.validate(), Err(vec![ValidationError::RiskTooLow(0.05)]));
        input.risk_pct = f64::NAN;
        assert_eq!(input.validate(), Err(vec![ValidationError::RiskNotFinite]));
    }

    #[test]
    fn end_must_be_strictly_after_start() {
        let mut input = valid();
        input.end_date = input.start_date;
        let errors = input.validate().unwrap_err();
        assert!(matches!(errors[0], ValidationError::EndNotAfterStart { .. }));
    }

    #[test]
    fn all_issues_are_reported() {
        let mut input = valid();
        input.risk_pct = 5.0;
        input.end_date = d(2023, 12, 1);
        assert_eq!(input.validate().unwrap_err().len(), 2);
    }

    #[test]
    fn presets_end_on_reference_and_validate() {
        let reference = d(2025, 6, 15);
        for preset in RunPreset::ALL {
            let input = preset.input(reference);
            assert_eq!(input.end_date, reference);
            assert!(input.validate().is_ok(), "{preset} should be valid");
        }
    }

    #[test]
    fn preset_windows() {
        let reference = d(2025, 6, 15);
        assert_eq!(RunPreset::QuickDemo.input(reference).start_date, d(2025, 3, 17));
        assert_eq!(RunPreset::Conservative.input(reference).start_date, d(2023, 6, 15));
        assert_eq!(RunPreset::TrendFocus.input(reference).timeframe, Timeframe::H4);
    }

    #[test]
    fn leap_day_year_window_clamps() {
        assert_eq!(years_before(d(2024, 2, 29), 1), d(2023, 2, 28));
    }

    #[test]
    fn presets_near_date_range_start_do_not_panic() {
        for preset in RunPreset::ALL {
            let input = preset.input(NaiveDate::MIN);
            assert_eq!(input.start_date, NaiveDate::MIN);
            assert_eq!(input.end_date, NaiveDate::MIN);
        }
        let near_min = NaiveDate::MIN + Duration::days(30);
        assert_eq!(RunPreset::QuickDemo.input(near_min).start_date, near_min);
    }

    #[test]
    fn preset_names_parse() {
        assert_eq!("trend_focus".parse::<RunPreset>().unwrap(), RunPreset::TrendFocus);
        assert!("yolo".parse::<RunPreset>().is_err());
    }
}
