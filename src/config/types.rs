// Configuration type definitions

use std::time::Duration;

use serde::Deserialize;

use super::ai_types::AiConfig;

fn default_cooldown_secs() -> u64 {
    60
}

fn default_timeout_ms() -> u64 {
    10_000
}

/// Advisory proxy tuning
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorConfig {
    /// Seconds to skip remote calls after a quota error
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
    /// Upper bound on a single remote call
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Max cached responses per operation; unbounded when absent
    #[serde(default)]
    pub cache_capacity: Option<usize>,
}

impl AdvisorConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            cooldown_secs: default_cooldown_secs(),
            timeout_ms: default_timeout_ms(),
            cache_capacity: None,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub advisor: AdvisorConfig,
    #[serde(default)]
    pub ai: AiConfig,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
