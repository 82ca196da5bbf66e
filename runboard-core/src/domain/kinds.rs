use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A string did not name any variant of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseKindError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Currency pair traded by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pair {
    #[serde(rename = "EURUSD")]
    EurUsd,
    #[serde(rename = "GBPUSD")]
    GbpUsd,
    #[serde(rename = "USDJPY")]
    UsdJpy,
    #[serde(rename = "AUDUSD")]
    AudUsd,
    #[serde(rename = "USDCAD")]
    UsdCad,
    #[serde(rename = "XAUUSD")]
    XauUsd,
}

impl Pair {
    pub const ALL: [Pair; 6] = [
        Pair::EurUsd,
        Pair::GbpUsd,
        Pair::UsdJpy,
        Pair::AudUsd,
        Pair::UsdCad,
        Pair::XauUsd,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Pair::EurUsd => "EURUSD",
            Pair::GbpUsd => "GBPUSD",
            Pair::UsdJpy => "USDJPY",
            Pair::AudUsd => "AUDUSD",
            Pair::UsdCad => "USDCAD",
            Pair::XauUsd => "XAUUSD",
        }
    }
}

impl FromStr for Pair {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pair::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseKindError::new("pair", s))
    }
}

/// Bar timeframe of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M15,
    H1,
    H4,
    D1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [Timeframe::M15, Timeframe::H1, Timeframe::H4, Timeframe::D1];

    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::M15 => "M15",
            Timeframe::H1 => "H1",
            Timeframe::H4 => "H4",
            Timeframe::D1 => "D1",
        }
    }

    /// Scales the synthetic trade count: shorter bars produce more trades.
    pub fn trade_multiplier(self) -> f64 {
        match self {
            Timeframe::M15 => 4.0,
            Timeframe::H1 => 2.5,
            Timeframe::H4 => 1.5,
            Timeframe::D1 => 1.0,
        }
    }
}

impl FromStr for Timeframe {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseKindError::new("timeframe", s))
    }
}

/// Strategy family a run was configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Momentum,
    MeanReversion,
    Breakout,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Momentum, Strategy::MeanReversion, Strategy::Breakout];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Momentum => "momentum",
            Strategy::MeanReversion => "mean_reversion",
            Strategy::Breakout => "breakout",
        }
    }
}

impl FromStr for Strategy {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseKindError::new("strategy", s))
    }
}

/// Lifecycle status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Queued,
    Running,
    Done,
    Failed,
}

impl RunStatus {
    pub const ALL: [RunStatus; 4] = [
        RunStatus::Queued,
        RunStatus::Running,
        RunStatus::Done,
        RunStatus::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::Running => "running",
            RunStatus::Done => "done",
            RunStatus::Failed => "failed",
        }
    }
}

impl FromStr for RunStatus {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RunStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ParseKindError::new("status", s))
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

display_as_str!(Pair, Timeframe, Strategy, RunStatus);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_roundtrip_through_from_str() {
        for pair in Pair::ALL {
            assert_eq!(pair.as_str().parse::<Pair>().unwrap(), pair);
        }
        for tf in Timeframe::ALL {
            assert_eq!(tf.as_str().parse::<Timeframe>().unwrap(), tf);
        }
        for strategy in Strategy::ALL {
            assert_eq!(strategy.as_str().parse::<Strategy>().unwrap(), strategy);
        }
        for status in RunStatus::ALL {
            assert_eq!(status.as_str().parse::<RunStatus>().unwrap(), status);
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("eurusd".parse::<Pair>().is_err());
        assert!("Done".parse::<RunStatus>().is_err());
        assert!("h1".parse::<Timeframe>().is_err());
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&Pair::XauUsd).unwrap(), "\"XAUUSD\"");
        assert_eq!(
            serde_json::to_string(&Strategy::MeanReversion).unwrap(),
            "\"mean_reversion\""
        );
        assert_eq!(serde_json::to_string(&RunStatus::Queued).unwrap(), "\"queued\"");
        let tf: Timeframe = serde_json::from_str("\"M15\"").unwrap();
        assert_eq!(tf, Timeframe::M15);
    }

    #[test]
    fn parse_error_names_the_kind() {
        let err = "W1".parse::<Timeframe>().unwrap_err();
        assert_eq!(err.to_string(), "unknown timeframe 'W1'");
    }
}
