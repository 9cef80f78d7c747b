//! Response parsing
//!
//! Turns raw response text into typed payloads. Anything that does not fit
//! the expected shape is a `RemoteCallError::Parse`, which the proxy treats
//! as a non-quota failure.

use super::fallback::MAX_PLACE_RESULTS;
use super::provider::RemoteCallError;
use super::types::{MaintenanceForecastItem, RoutePlan};

/// Remove a surrounding markdown code fence, if any
///
/// Handles both ```` ```json ... ``` ```` and bare ```` ``` ... ``` ````.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    let inner = inner
        .strip_prefix("json")
        .or_else(|| inner.strip_prefix("JSON"))
        .unwrap_or(inner);
    inner.trim()
}

/// Split a comma/newline separated list of place names
///
/// Tokens of two characters or fewer are dropped. An empty result is an error
/// so it never reaches the cache.
pub fn parse_places(text: &str) -> Result<Vec<String>, RemoteCallError> {
    let places: Vec<String> = text
        .split([',', '\n'])
        .map(str::trim)
        .filter(|token| token.chars().count() > 2)
        .take(MAX_PLACE_RESULTS)
        .map(str::to_string)
        .collect();

    if places.is_empty() {
        return Err(RemoteCallError::parse("no place names in response"));
    }
    Ok(places)
}

fn check_quantity(name: &str, value: f64) -> Result<(), RemoteCallError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RemoteCallError::parse(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

pub fn parse_route_plan(text: &str) -> Result<RoutePlan, RemoteCallError> {
    let mut plan: RoutePlan = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| RemoteCallError::parse(format!("route plan: {}", e)))?;

    plan.route_name = plan.route_name.trim().to_string();
    if plan.route_name.is_empty() {
        return Err(RemoteCallError::parse("route plan has no name"));
    }

    plan.steps.retain(|step| !step.trim().is_empty());
    if plan.steps.is_empty() {
        return Err(RemoteCallError::parse("route plan has no steps"));
    }

    check_quantity("total_distance_km", plan.total_distance_km)?;
    check_quantity("estimated_duration_min", plan.estimated_duration_min)?;
    check_quantity("fuel_cost_estimate", plan.fuel_cost_estimate)?;
    if !(0.0..=100.0).contains(&plan.efficiency_score) {
        return Err(RemoteCallError::parse(format!(
            "efficiency_score out of range: {}",
            plan.efficiency_score
        )));
    }

    Ok(plan)
}

pub fn parse_forecast(text: &str) -> Result<Vec<MaintenanceForecastItem>, RemoteCallError> {
    let items: Vec<MaintenanceForecastItem> = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| RemoteCallError::parse(format!("forecast: {}", e)))?;

    if items.is_empty() {
        return Err(RemoteCallError::parse("forecast has no tasks"));
    }

    for item in &items {
        if item.task.trim().is_empty() {
            return Err(RemoteCallError::parse("forecast task without a name"));
        }
        check_quantity("estimated_mileage", item.estimated_mileage)?;
        check_quantity("estimated_cost", item.estimated_cost)?;
    }

    Ok(items)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod parser_tests;
