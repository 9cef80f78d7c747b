//! Deterministic local answers
//!
//! Used whenever the remote service is skipped or fails. Every function here
//! is pure and total.

use super::types::{MaintenanceForecastItem, RoutePlan, Urgency};

/// Most results any place lookup returns
pub const MAX_PLACE_RESULTS: usize = 5;

/// Known logistics hubs used for offline autocomplete
pub const REFERENCE_HUBS: [&str; 16] = [
    "Mumbai, Maharashtra",
    "Delhi, NCR",
    "Bengaluru, Karnataka",
    "Hyderabad, Telangana",
    "Ahmedabad, Gujarat",
    "Chennai, Tamil Nadu",
    "Kolkata, West Bengal",
    "Surat, Gujarat",
    "Pune, Maharashtra",
    "Jaipur, Rajasthan",
    "Lucknow, Uttar Pradesh",
    "Kanpur, Uttar Pradesh",
    "Nagpur, Maharashtra",
    "Indore, Madhya Pradesh",
    "Thane, Maharashtra",
    "Bhopal, Madhya Pradesh",
];

/// Hubs whose name contains `query`, case-insensitively
pub fn local_places(query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    REFERENCE_HUBS
        .iter()
        .filter(|hub| hub.to_lowercase().contains(&needle))
        .take(MAX_PLACE_RESULTS)
        .map(|hub| hub.to_string())
        .collect()
}

/// Placeholder corridor plan; the figures are fixed, not geographic
pub fn local_route(origin: &str, destination: &str) -> RoutePlan {
    RoutePlan {
        route_name: format!("Standard NH Corridor ({origin} to {destination})"),
        steps: vec![
            format!("Exit {origin} via main logistics hub."),
            "Connect to nearest National Highway (NH) corridor.".to_string(),
            "Maintain steady cruise speed for optimal fuel efficiency.".to_string(),
            "Pass through state border checkpoint (E-Way Bill Verification).".to_string(),
            format!("Arrive at {destination} regional distribution center."),
        ],
        total_distance_km: 150.0,
        estimated_duration_min: 240.0,
        fuel_cost_estimate: 2500.0,
        efficiency_score: 85.0,
    }
}

/// Generic two-task forecast
pub fn local_forecast() -> Vec<MaintenanceForecastItem> {
    vec![
        MaintenanceForecastItem {
            task: "General Fluid Check".to_string(),
            urgency: Urgency::Medium,
            estimated_mileage: 1000.0,
            estimated_cost: 1500.0,
            reason: "Scheduled periodic assessment (Local Fallback Mode).".to_string(),
        },
        MaintenanceForecastItem {
            task: "Tyre Rotation".to_string(),
            urgency: Urgency::Low,
            estimated_mileage: 2500.0,
            estimated_cost: 800.0,
            reason: "Standard wear-level optimization.".to_string(),
        },
    ]
}
