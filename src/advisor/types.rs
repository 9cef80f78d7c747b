//! Advisory payload types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where an advisory answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    /// Produced by the remote AI call
    #[serde(rename = "AI", alias = "Remote")]
    Remote,
    /// Produced by the deterministic fallback
    Local,
}

impl Provenance {
    pub fn label(&self) -> &'static str {
        match self {
            Provenance::Remote => "AI",
            Provenance::Local => "Local",
        }
    }
}

/// An advisory answer tagged with its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advisory<T> {
    pub source: Provenance,
    /// Cooldown was active when the answer was produced
    pub quota_exhausted: bool,
    pub payload: T,
}

impl<T> Advisory<T> {
    pub fn remote(payload: T, quota_exhausted: bool) -> Self {
        Self {
            source: Provenance::Remote,
            quota_exhausted,
            payload,
        }
    }

    pub fn local(payload: T, quota_exhausted: bool) -> Self {
        Self {
            source: Provenance::Local,
            quota_exhausted,
            payload,
        }
    }

    pub fn is_remote(&self) -> bool {
        self.source == Provenance::Remote
    }
}

/// Suggested route between two places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub route_name: String,
    pub steps: Vec<String>,
    pub total_distance_km: f64,
    pub estimated_duration_min: f64,
    pub fuel_cost_estimate: f64,
    /// 0..=100
    pub efficiency_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [
        Urgency::Low,
        Urgency::Medium,
        Urgency::High,
        Urgency::Critical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
            Urgency::Critical => "Critical",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            "critical" => Ok(Urgency::Critical),
            other => Err(format!("unknown urgency level: {other}")),
        }
    }
}

impl TryFrom<String> for Urgency {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One predicted maintenance task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceForecastItem {
    pub task: String,
    pub urgency: Urgency,
    #[serde(default)]
    pub estimated_mileage: f64,
    pub estimated_cost: f64,
    #[serde(default)]
    pub reason: String,
}
