//! Prompt template generation
//!
//! Builds the prompt text and response schemas for each advisory operation.

use serde_json::{Value, json};

use crate::fleet::{MaintenanceRecord, Vehicle};

/// Prompt for place autocomplete: exactly five names, no prose
pub fn places_prompt(query: &str) -> String {
    format!(
        "Return a comma-separated list of exactly 5 major Indian logistics cities that match or relate to \"{}\". Names only.",
        query.trim()
    )
}

/// Prompt for route optimization
pub fn route_prompt(origin: &str, destination: &str, vehicle_type: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!(
        "Suggest an optimized route from {} to {} for a {}.\n",
        origin.trim(),
        destination.trim(),
        vehicle_type.trim()
    ));
    prompt.push_str("Return JSON: { \"route_name\": \"string\", \"steps\": [\"step1\", \"step2\"], ");
    prompt.push_str("\"total_distance_km\": number, \"estimated_duration_min\": number, ");
    prompt.push_str("\"fuel_cost_estimate\": number, \"efficiency_score\": number }\n");
    prompt.push_str("efficiency_score is between 0 and 100. Fuel cost is in INR.");
    prompt
}

pub fn route_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "route_name": { "type": "STRING" },
            "steps": { "type": "ARRAY", "items": { "type": "STRING" } },
            "total_distance_km": { "type": "NUMBER" },
            "estimated_duration_min": { "type": "NUMBER" },
            "fuel_cost_estimate": { "type": "NUMBER" },
            "efficiency_score": { "type": "NUMBER" }
        },
        "required": [
            "route_name",
            "steps",
            "total_distance_km",
            "estimated_duration_min",
            "fuel_cost_estimate",
            "efficiency_score"
        ]
    })
}

/// Flatten service history to `date: serviceType, ...`
pub fn flatten_history(history: &[MaintenanceRecord]) -> String {
    history
        .iter()
        .map(|record| format!("{}: {}", record.date.format("%Y-%m-%d"), record.service_type))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prompt for predictive maintenance
///
/// The three-task limit lives only in the prompt; replies are not truncated.
pub fn maintenance_prompt(vehicle: &Vehicle, history: &[MaintenanceRecord]) -> String {
    let history_text = if history.is_empty() {
        "none recorded".to_string()
    } else {
        flatten_history(history)
    };

    let mut prompt = String::new();
    prompt.push_str(&format!(
        "Analyze: {} {} ({}, {}), {}km. History: {}.\n",
        vehicle.make,
        vehicle.model,
        vehicle.year,
        vehicle.vehicle_type,
        vehicle.mileage,
        history_text
    ));
    prompt.push_str("Predict next 3 tasks in JSON array: [{ \"task\": \"string\", ");
    prompt.push_str("\"urgency\": \"Low|Medium|High|Critical\", \"estimated_mileage\": number, ");
    prompt.push_str("\"estimated_cost\": number, \"reason\": \"string\" }]");
    prompt
}

pub fn forecast_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "task": { "type": "STRING" },
                "urgency": {
                    "type": "STRING",
                    "enum": ["Low", "Medium", "High", "Critical"]
                },
                "estimated_mileage": { "type": "NUMBER" },
                "estimated_cost": { "type": "NUMBER" },
                "reason": { "type": "STRING" }
            },
            "required": ["task", "urgency", "estimated_cost"]
        }
    })
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod prompt_tests;
