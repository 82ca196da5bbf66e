//! Simulated network latency and failure injection.
//!
//! Uses the thread-local platform RNG; nothing here is reproducible, and
//! nothing here touches the hash-seeded generator used for run metrics.

use rand::Rng;
use std::time::Duration;

use crate::config::SimulationConfig;

/// Whether random failure injection applies to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomFailures {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Uniform draw from `[min_latency_ms, max_latency_ms]`.
    pub fn draw_latency(&self) -> Duration {
        let (min, max) = (self.config.min_latency_ms, self.config.max_latency_ms);
        if max <= min {
            return Duration::from_millis(min);
        }
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }

    /// Suspend for one latency draw. The RNG is not held across the await.
    pub async fn wait(&self) {
        let delay = self.draw_latency();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Decide whether this call fails.
    ///
    /// An explicit override wins in both directions; otherwise a random draw
    /// against `failure_rate`, when random failures apply to the operation.
    pub fn should_fail(&self, force_error: Option<bool>, random: RandomFailures) -> bool {
        if let Some(forced) = force_error {
            return forced;
        }
        if random == RandomFailures::Disabled || self.config.failure_rate <= 0.0 {
            return false;
        }
        rand::thread_rng().gen_bool(self.config.failure_rate.min(1.0))
    }
}
