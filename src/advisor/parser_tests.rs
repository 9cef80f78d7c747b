//! Tests for response parsing

use super::*;
use crate::advisor::types::Urgency;
use proptest::prelude::*;

const ROUTE_JSON: &str = r#"{
    "route_name": "Mumbai-Pune Expressway",
    "steps": ["Take the Eastern Freeway", "Join NH48", "Exit at Pune"],
    "total_distance_km": 148.5,
    "estimated_duration_min": 180,
    "fuel_cost_estimate": 2100,
    "efficiency_score": 92
}"#;

// **Feature: advisory-proxy, Property: place parsing bounds**
// *For any* response text, parsed places are trimmed, longer than two
// characters, and at most five.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_parsed_places_are_bounded(text in "[a-zA-Z ,\n]{0,120}") {
        if let Ok(places) = parse_places(&text) {
            prop_assert!(!places.is_empty());
            prop_assert!(places.len() <= 5);
            for place in &places {
                prop_assert_eq!(place.trim(), place.as_str());
                prop_assert!(place.chars().count() > 2);
            }
        }
    }
}

#[test]
fn test_parse_places_comma_separated() {
    let places = parse_places("Mumbai, Pune, Nashik, Thane, Nagpur").unwrap();
    assert_eq!(places, vec!["Mumbai", "Pune", "Nashik", "Thane", "Nagpur"]);
}

#[test]
fn test_parse_places_mixed_separators_and_cap() {
    let places = parse_places("Delhi\nNoida, Gurugram\n\nFaridabad,Ghaziabad,Meerut").unwrap();
    assert_eq!(places.len(), 5);
    assert_eq!(places[0], "Delhi");
    assert_eq!(places[4], "Ghaziabad");
}

#[test]
fn test_parse_places_drops_short_tokens() {
    let places = parse_places("a, NY, Pune , ,").unwrap();
    assert_eq!(places, vec!["Pune"]);
}

#[test]
fn test_parse_places_empty_is_error() {
    assert!(matches!(
        parse_places(" , ab,\n"),
        Err(RemoteCallError::Parse { .. })
    ));
}

#[test]
fn test_strip_code_fence_variants() {
    assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    assert_eq!(strip_code_fence("```\n[1]\n```"), "[1]");
    assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
    assert_eq!(strip_code_fence("```json {\"a\":1}```"), "{\"a\":1}");
}

#[test]
fn test_parse_route_plan_valid() {
    let plan = parse_route_plan(ROUTE_JSON).unwrap();
    assert_eq!(plan.route_name, "Mumbai-Pune Expressway");
    assert_eq!(plan.steps.len(), 3);
    assert_eq!(plan.total_distance_km, 148.5);
    assert_eq!(plan.efficiency_score, 92.0);
}

#[test]
fn test_parse_route_plan_fenced() {
    let fenced = format!("```json\n{}\n```", ROUTE_JSON);
    assert!(parse_route_plan(&fenced).is_ok());
}

#[test]
fn test_parse_route_plan_rejects_out_of_range_score() {
    let text = ROUTE_JSON.replace("\"efficiency_score\": 92", "\"efficiency_score\": 140");
    let err = parse_route_plan(&text).unwrap_err();
    assert!(err.to_string().contains("efficiency_score"));
    assert!(!err.is_quota_exceeded());
}

#[test]
fn test_parse_route_plan_rejects_negative_distance() {
    let text = ROUTE_JSON.replace("148.5", "-3");
    assert!(parse_route_plan(&text).is_err());
}

#[test]
fn test_parse_route_plan_rejects_blank_steps() {
    let text = ROUTE_JSON.replace(
        r#"["Take the Eastern Freeway", "Join NH48", "Exit at Pune"]"#,
        r#"["", "  "]"#,
    );
    assert!(parse_route_plan(&text).is_err());
}

#[test]
fn test_parse_route_plan_rejects_missing_field() {
    let text = r#"{"route_name": "X", "steps": ["a"]}"#;
    assert!(matches!(
        parse_route_plan(text),
        Err(RemoteCallError::Parse { .. })
    ));
}

#[test]
fn test_parse_forecast_valid_case_insensitive_urgency() {
    let text = r#"[
        {"task": "Clutch Inspection", "urgency": "high", "estimated_mileage": 36000,
         "estimated_cost": 4500, "reason": "Recent clutch work"},
        {"task": "Brake Fluid Flush", "urgency": "Medium", "estimated_cost": 1200}
    ]"#;
    let items = parse_forecast(text).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].urgency, Urgency::High);
    assert_eq!(items[1].estimated_mileage, 0.0);
    assert_eq!(items[1].reason, "");
}

#[test]
fn test_parse_forecast_keeps_more_than_three_items() {
    let item = r#"{"task": "T", "urgency": "Low", "estimated_cost": 1}"#;
    let text = format!("[{item},{item},{item},{item}]");
    assert_eq!(parse_forecast(&text).unwrap().len(), 4);
}

#[test]
fn test_parse_forecast_rejects_unknown_urgency() {
    let text = r#"[{"task": "T", "urgency": "Whenever", "estimated_cost": 1}]"#;
    assert!(parse_forecast(text).is_err());
}

#[test]
fn test_parse_forecast_rejects_empty_array() {
    assert!(parse_forecast("[]").is_err());
}

#[test]
fn test_parse_forecast_rejects_object() {
    assert!(parse_forecast(r#"{"task": "T"}"#).is_err());
}
