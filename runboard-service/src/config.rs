//! Service configuration, loaded from TOML.
//!
//! ```toml
//! [simulation]
//! min_latency_ms = 200
//! max_latency_ms = 400
//! failure_rate = 0.01
//! random_create_failures = false
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub simulation: SimulationConfig,
}

/// Simulated network behaviour. The numbers are presentation defaults, not contracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    /// Probability in `[0, 1]` that a read fails when no override is given.
    pub failure_rate: f64,
    /// Whether creation is subject to random failure as well.
    pub random_create_failures: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_latency_ms: 200,
            max_latency_ms: 400,
            failure_rate: 0.01,
            random_create_failures: false,
        }
    }
}

impl SimulationConfig {
    /// No latency and no random failures. Forced failures still apply.
    pub fn instant() -> Self {
        Self {
            min_latency_ms: 0,
            max_latency_ms: 0,
            failure_rate: 0.0,
            random_create_failures: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_latency_ms > self.max_latency_ms {
            return Err(ConfigError::Invalid(format!(
                "min_latency_ms ({}) exceeds max_latency_ms ({})",
                self.min_latency_ms, self.max_latency_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(ConfigError::Invalid(format!(
                "failure_rate must be within [0, 1], got {}",
                self.failure_rate
            )));
        }
        Ok(())
    }
}

impl ServiceConfig {
    pub fn instant() -> Self {
        Self {
            simulation: SimulationConfig::instant(),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_gives_defaults() {
        let config = ServiceConfig::from_toml_str("").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.simulation.min_latency_ms, 200);
        assert_eq!(config.simulation.max_latency_ms, 400);
        assert_eq!(config.simulation.failure_rate, 0.01);
        assert!(!config.simulation.random_create_failures);
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let config = ServiceConfig::from_toml_str("[simulation]\nfailure_rate = 0.5\n").unwrap();
        assert_eq!(config.simulation.failure_rate, 0.5);
        assert_eq!(config.simulation.max_latency_ms, 400);
    }

    #[test]
    fn inverted_latency_is_rejected() {
        let err = ServiceConfig::from_toml_str(
            "[simulation]\nmin_latency_ms = 500\nmax_latency_ms = 100\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn failure_rate_out_of_range_is_rejected() {
        let err = ServiceConfig::from_toml_str("[simulation]\nfailure_rate = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = ServiceConfig::from_toml_str("[simulation\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let config = ServiceConfig::instant();
        let text = config.to_toml_string().unwrap();
        assert_eq!(ServiceConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nmin_latency_ms = 0\nmax_latency_ms = 5").unwrap();
        let config = ServiceConfig::load(file.path()).unwrap();
        assert_eq!(config.simulation.max_latency_ms, 5);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServiceConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
