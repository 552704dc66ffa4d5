//! Configuration and persistence tests
//!
//! Config, trip request and trip plan files on disk.

use chrono::NaiveDate;
use holiday_planner::{
    Currency, FixtureCatalog, PlannerConfig, PlannerSession, RefreshTimings, Step, TripPlan,
    TripRequest,
};
use std::fs;
use tempfile::tempdir;

fn bali_request() -> TripRequest {
    let mut request = TripRequest::starting_on(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
    request.destination = "Bali, Indonesia".into();
    request.departure_city = "London".into();
    request.adults = 2;
    request
}

// ============================================================================
// Planner config
// ============================================================================

#[test]
fn test_config_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("planner.json");

    let mut config = PlannerConfig::new();
    config.currency = Some(Currency::Eur);
    config.refresh = RefreshTimings {
        major_change_ms: 500,
        ..RefreshTimings::default()
    };
    config.defaults.budget = 3000.0;
    config.save_to_file(&path).unwrap();

    let loaded = PlannerConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.resolve_currency(None), Currency::Eur);
}

#[test]
fn test_config_file_uses_camel_case() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("planner.json");
    PlannerConfig::new().save_to_file(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("majorChangeMs"));
    assert!(text.contains("durationDays"));
    // Unset options are left out
    assert!(!text.contains("fixtureFile"));
}

#[test]
fn test_invalid_config_is_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("planner.json");
    fs::write(&path, r#"{"defaults": {"adults": 0}}"#).unwrap();

    let err = PlannerConfig::load_from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("adults"));
}

#[test]
fn test_missing_config_file() {
    let err = PlannerConfig::load_from_file("/nonexistent/planner.json").unwrap_err();
    assert!(err.to_string().contains("Failed to read config"));
}

#[test]
fn test_config_fixture_file() {
    let dir = tempdir().unwrap();
    let fixtures = dir.path().join("planning.json");
    fs::write(&fixtures, r#"{"activities": {}}"#).unwrap();

    let config = PlannerConfig {
        fixture_file: Some(fixtures),
        ..PlannerConfig::default()
    };
    let catalog = config.catalog().unwrap();
    assert!(catalog.destinations().is_empty());

    let config = PlannerConfig {
        fixture_file: Some(dir.path().join("missing.json")),
        ..PlannerConfig::default()
    };
    assert!(config.catalog().is_err());
}

// ============================================================================
// Trip requests
// ============================================================================

#[test]
fn test_request_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("request.json");

    let request = bali_request();
    request.save_to_file(&path).unwrap();

    let loaded = TripRequest::load_from_file(&path).unwrap();
    assert_eq!(loaded, request);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_minimal_request_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("request.json");
    fs::write(
        &path,
        r#"{
            "destination": "Tokyo, Japan",
            "startDate": "2026-04-01",
            "endDate": "2026-04-06",
            "durationDays": 5,
            "budget": 2500
        }"#,
    )
    .unwrap();

    let request = TripRequest::load_from_file(&path).unwrap();
    assert_eq!(request.adults, 1);
    assert_eq!(request.children, 0);
    assert!(request.preferences.themes.is_empty());
    assert_eq!(request.travellers(), 1);
}

#[test]
fn test_request_validation() {
    let mut request = bali_request();
    assert!(request.validate().is_ok());

    request.destination = "  ".into();
    assert!(request.validate().is_err());

    let mut request = bali_request();
    request.adults = 0;
    assert!(request.validate().is_err());

    let mut request = bali_request();
    request.budget = -1.0;
    assert!(request.validate().is_err());

    let mut request = bali_request();
    request.duration_days = 4_000_000_000;
    assert!(request.validate().is_err());

    let mut request = bali_request();
    request.end_date = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
    let err = request.validate().unwrap_err();
    assert!(err.to_string().contains("before start date"));
}

// ============================================================================
// Trip plans
// ============================================================================

#[test]
fn test_plan_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.json");

    let mut session =
        PlannerSession::new(Box::new(FixtureCatalog::embedded().unwrap()), bali_request());
    session.toggle_activity("bali-act-2");
    session.toggle_accommodation("bali-acc-4");
    session.toggle_transportation("bali-tr-2");
    session.set_custom_input(Step::Transportation, "Window seat");

    let plan = session.plan();
    plan.save_to_file(&path).unwrap();

    let loaded = TripPlan::load_from_file(&path).unwrap();
    assert_eq!(loaded.id, plan.id);
    assert_eq!(loaded.created_at, plan.created_at);
    assert_eq!(loaded.request, plan.request);
    assert_eq!(loaded.itinerary, plan.itinerary);
    let stay_ids: Vec<&str> = loaded
        .selections
        .accommodation
        .iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(stay_ids, vec!["bali-acc-4"]);
    assert_eq!(loaded.summary.total, 25.0 + 90.0 * 7.0 + 680.0);
    assert_eq!(loaded.custom_inputs.get(Step::Transportation), "Window seat");

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"withinBudget\": true"));
    assert!(text.contains("\"pricePerNight\""));
}

#[test]
fn test_corrupt_plan_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.json");
    fs::write(&path, "{ not json").unwrap();

    let err = TripPlan::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse trip plan"));
}
