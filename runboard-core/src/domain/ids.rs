use serde::{Deserialize, Serialize};
use std::fmt;

use super::run::Run;

/// Prefix shared by every run identifier.
pub const RUN_ID_PREFIX: &str = "RUN-";

/// Lowest number the id scan starts from; the first generated id is `RUN-101`.
pub const RUN_ID_FLOOR: u64 = 100;

/// Run identifier in the form `RUN-###`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id for a sequence number, zero-padded to at least three digits.
    pub fn from_number(number: u64) -> Self {
        Self(format!("{RUN_ID_PREFIX}{number:03}"))
    }

    /// Numeric suffix, if the id follows the `RUN-<digits>` pattern.
    pub fn number(&self) -> Option<u64> {
        let digits = self.0.strip_prefix(RUN_ID_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RunId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Next free id for a collection: one past the highest `RUN-<digits>` suffix,
/// never below `RUN_ID_FLOOR + 1`. Ids outside the pattern are ignored.
pub fn next_run_id(runs: &[Run]) -> RunId {
    let highest = runs
        .iter()
        .filter_map(|run| run.id.number())
        .fold(RUN_ID_FLOOR, u64::max);
    RunId::from_number(highest.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_parses_pattern_only() {
        assert_eq!(RunId::from("RUN-042").number(), Some(42));
        assert_eq!(RunId::from("RUN-1234").number(), Some(1234));
        assert_eq!(RunId::from("RUN-").number(), None);
        assert_eq!(RunId::from("RUN-12a").number(), None);
        assert_eq!(RunId::from("JOB-101").number(), None);
        assert_eq!(RunId::from("RUN--5").number(), None);
    }

    #[test]
    fn from_number_pads_to_three_digits() {
        assert_eq!(RunId::from_number(7).as_str(), "RUN-007");
        assert_eq!(RunId::from_number(102).as_str(), "RUN-102");
        assert_eq!(RunId::from_number(1001).as_str(), "RUN-1001");
    }

    #[test]
    fn next_id_on_empty_collection_starts_past_floor() {
        assert_eq!(next_run_id(&[]).as_str(), "RUN-101");
    }
}
