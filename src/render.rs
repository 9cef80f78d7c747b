//! Plain-text rendering of advisories for the terminal

use std::fmt::Write;

use crate::advisor::{Advisory, MaintenanceForecastItem, Provenance, RoutePlan};

fn header<T>(advisory: &Advisory<T>, title: &str) -> String {
    let mut line = format!("[{}] {}", advisory.source.label(), title);
    if advisory.quota_exhausted {
        line.push_str(" (AI quota exhausted, retrying later)");
    }
    line
}

/// Minutes as `Hh MMm`
pub fn format_duration(minutes: f64) -> String {
    let total = minutes.max(0.0).round() as u64;
    format!("{}h {:02}m", total / 60, total % 60)
}

pub fn render_places(advisory: &Advisory<Vec<String>>) -> String {
    if advisory.payload.is_empty() {
        return header(advisory, "No suggestions");
    }

    let mut out = header(
        advisory,
        &format!("{} suggestion(s)", advisory.payload.len()),
    );
    for place in &advisory.payload {
        let _ = write!(out, "\n  {}", place);
    }
    out
}

pub fn render_route(advisory: &Advisory<RoutePlan>) -> String {
    let plan = &advisory.payload;
    let mut out = header(advisory, &plan.route_name);
    let _ = write!(
        out,
        "\n  {:.0} km | {} | fuel INR {:.0} | efficiency {:.0}/100",
        plan.total_distance_km,
        format_duration(plan.estimated_duration_min),
        plan.fuel_cost_estimate,
        plan.efficiency_score
    );
    for (index, step) in plan.steps.iter().enumerate() {
        let _ = write!(out, "\n  {}. {}", index + 1, step);
    }
    out
}

pub fn render_forecast(advisory: &Advisory<Vec<MaintenanceForecastItem>>) -> String {
    let mut out = header(
        advisory,
        &format!("{} predicted task(s)", advisory.payload.len()),
    );
    for item in &advisory.payload {
        let _ = write!(
            out,
            "\n  - {} [{}] at ~{:.0} km, est. INR {:.0}",
            item.task, item.urgency, item.estimated_mileage, item.estimated_cost
        );
        if !item.reason.is_empty() {
            let _ = write!(out, "\n    {}", item.reason);
        }
    }
    if advisory.source == Provenance::Local {
        out.push_str("\n  (generic schedule, not based on this vehicle's history)");
    }
    out
}
