//! Tests for Application State Management
//!
//! These tests verify:
//! - AppState default initialization
//! - RequestField parsing
//! - Key handling through the App: navigation, toggles, dialogs, help
//! - Rendering into a test backend

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use holiday_planner::app::{App, AppState, PendingEdit, RequestField};
use holiday_planner::{
    Currency, FixtureCatalog, ManualClock, PlannerSession, Step, TripRequest, WizardStep,
};
use ratatui::{Terminal, backend::TestBackend};
use std::path::PathBuf;
use std::sync::Arc;

fn request() -> TripRequest {
    let mut request = TripRequest::starting_on(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
    request.destination = "Atlantis".into();
    request
}

fn app_with_save(save_path: Option<PathBuf>) -> App {
    let session = PlannerSession::new(Box::new(FixtureCatalog::embedded().unwrap()), request())
        .with_clock(Box::new(Arc::new(ManualClock::new())));
    App::new(session, Currency::Usd, save_path)
}

fn app() -> App {
    app_with_save(None)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key_event(key(code))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

// =============================================================================
// AppState Default Tests
// =============================================================================

#[test]
fn test_app_state_default_step_is_destination() {
    let state = AppState::default();
    assert_eq!(state.step, WizardStep::Destination);
    assert_eq!(state.current_field(), Some(RequestField::Destination));
}

#[test]
fn test_app_state_default_has_welcome_message() {
    let state = AppState::default();
    assert!(state.status_message.contains("Welcome"));
}

#[test]
fn test_app_state_default_no_dialogs() {
    let state = AppState::default();
    assert!(!state.help_visible);
    assert!(state.pending_edit.is_none());
    assert!(state.searches.iter().all(String::is_empty));
    assert_eq!(state.review_scroll, 0);
}

// =============================================================================
// RequestField Tests
// =============================================================================

#[test]
fn test_request_field_order() {
    assert_eq!(RequestField::from_index(0), Some(RequestField::Destination));
    assert_eq!(
        RequestField::from_index(RequestField::count() - 1),
        Some(RequestField::TransportPreferences)
    );
    assert_eq!(RequestField::from_index(RequestField::count()), None);
}

#[test]
fn test_request_field_parse_budget() {
    let patch = RequestField::Budget.parse("$3,500", &request()).unwrap();
    assert_eq!(patch.budget, Some(3500.0));
    assert!(RequestField::Budget.parse("lots", &request()).is_err());
}

#[test]
fn test_request_field_parse_duration_moves_end_date() {
    let patch = RequestField::Duration.parse("10", &request()).unwrap();
    assert_eq!(patch.duration_days, Some(10));
    assert_eq!(patch.end_date, NaiveDate::from_ymd_opt(2026, 5, 11));
    assert!(RequestField::Duration.parse("0", &request()).is_err());
}

#[test]
fn test_request_field_parse_start_date() {
    let patch = RequestField::StartDate.parse("2026-06-10", &request()).unwrap();
    assert_eq!(patch.start_date, NaiveDate::from_ymd_opt(2026, 6, 10));
    assert_eq!(patch.end_date, NaiveDate::from_ymd_opt(2026, 6, 17));
    assert!(RequestField::StartDate.parse("10/06/2026", &request()).is_err());
}

#[test]
fn test_request_field_parse_lists() {
    let patch = RequestField::Themes
        .parse("Beach, Culture,, ", &request())
        .unwrap();
    let themes = patch.preferences.and_then(|p| p.themes).unwrap();
    assert_eq!(themes, vec!["beach", "culture"]);
}

#[test]
fn test_request_field_parse_adults() {
    assert_eq!(
        RequestField::Adults.parse("2", &request()).unwrap().adults,
        Some(2)
    );
    assert!(RequestField::Adults.parse("0", &request()).is_err());
    assert!(RequestField::Adults.parse("two", &request()).is_err());
}

// =============================================================================
// Navigation Tests
// =============================================================================

#[test]
fn test_tab_moves_through_steps() {
    let mut app = app();
    for expected in [
        WizardStep::Activities,
        WizardStep::Accommodation,
        WizardStep::Transportation,
        WizardStep::Review,
    ] {
        assert!(!press(&mut app, KeyCode::Tab));
        assert_eq!(app.state().step, expected);
    }
    // Review is the last step
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state().step, WizardStep::Review);

    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.state().step, WizardStep::Transportation);
}

#[test]
fn test_catalog_cursors_start_on_first_item() {
    let app = app();
    for step in [Step::Activities, Step::Accommodation, Step::Transportation] {
        assert_eq!(app.state().catalog_list(step).selected(), Some(0));
    }
}

#[test]
fn test_cursor_stays_in_bounds() {
    let mut app = app();
    press(&mut app, KeyCode::Tab);
    for _ in 0..10 {
        press(&mut app, KeyCode::Down);
    }
    assert_eq!(app.state().catalog_list(Step::Activities).selected(), Some(2));
    press(&mut app, KeyCode::Home);
    assert_eq!(app.state().catalog_list(Step::Activities).selected(), Some(0));
}

// =============================================================================
// Toggle Tests
// =============================================================================

#[test]
fn test_space_toggles_highlighted_item() {
    let mut app = app();
    press(&mut app, KeyCode::Tab);

    press(&mut app, KeyCode::Char(' '));
    assert!(app.session().selections().contains(Step::Activities, "default-1"));
    assert!(app.state().status_message.contains("Added to Activities"));

    press(&mut app, KeyCode::Char(' '));
    assert!(app.session().selections().activities.is_empty());
}

#[test]
fn test_toggle_reports_cleared_steps() {
    let mut app = app();
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char(' ')); // default-1 stay
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char(' ')); // default-1 transport
    assert_eq!(app.session().selections().transportation.len(), 1);

    press(&mut app, KeyCode::BackTab);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' ')); // default-2 stay

    assert!(app.session().selections().transportation.is_empty());
    assert!(app.state().status_message.contains("cleared Transportation"));
}

// =============================================================================
// Dialog Tests
// =============================================================================

#[test]
fn test_edit_destination_clears_selections() {
    let mut app = app();
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::BackTab);

    press(&mut app, KeyCode::Enter);
    assert!(app.input_handler().is_dialog_active());
    assert_eq!(
        app.state().pending_edit,
        Some(PendingEdit::Field(RequestField::Destination))
    );

    for _ in 0.."Atlantis".len() {
        press(&mut app, KeyCode::Backspace);
    }
    type_text(&mut app, "Bali, Indonesia");
    press(&mut app, KeyCode::Enter);

    assert!(!app.input_handler().is_dialog_active());
    assert_eq!(app.session().request().destination, "Bali, Indonesia");
    assert!(app.session().selections().is_empty());
    assert!(app.state().status_message.contains("selections reset"));
    assert!(app.session().is_refreshing(Step::Activities));
}

#[test]
fn test_invalid_input_keeps_request() {
    let mut app = app();
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down); // Duration
    assert_eq!(app.state().current_field(), Some(RequestField::Duration));

    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Backspace);
    type_text(&mut app, "x");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.session().request().duration_days, 7);
    assert!(app.state().status_message.contains("whole number"));
}

#[test]
fn test_absurd_duration_is_rejected() {
    let mut app = app();
    for _ in 0..3 {
        press(&mut app, KeyCode::Down);
    }
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Backspace);
    type_text(&mut app, "4000000000");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.session().request().duration_days, 7);
    assert!(app.state().status_message.contains("at most 365"));
}

#[test]
fn test_escape_cancels_dialog() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "xyz");
    press(&mut app, KeyCode::Esc);

    assert!(!app.input_handler().is_dialog_active());
    assert!(app.state().pending_edit.is_none());
    assert_eq!(app.session().request().destination, "Atlantis");
}

#[test]
fn test_search_narrows_list() {
    let mut app = app();
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "culture");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.state().search(Step::Activities), "culture");
    press(&mut app, KeyCode::Char(' '));
    assert!(app.session().selections().contains(Step::Activities, "default-2"));

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.state().search(Step::Activities), "");
}

#[test]
fn test_note_is_stored_on_session() {
    let mut app = app();
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "Vegetarian meals");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.session().custom_input(Step::Activities), "Vegetarian meals");
}

// =============================================================================
// Help and Exit Tests
// =============================================================================

#[test]
fn test_help_overlay_swallows_keys() {
    let mut app = app();
    press(&mut app, KeyCode::Char('?'));
    assert!(app.state().help_visible);

    assert!(!press(&mut app, KeyCode::Char('q')));
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state().step, WizardStep::Destination);

    press(&mut app, KeyCode::Char('?'));
    assert!(!app.state().help_visible);
    assert!(press(&mut app, KeyCode::Char('q')));
}

#[test]
fn test_ctrl_c_quits() {
    let mut app = app();
    assert!(app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(app.finished().is_none());
}

#[test]
fn test_finish_saves_plan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");
    let mut app = app_with_save(Some(path.clone()));

    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char(' '));
    for _ in 0..3 {
        press(&mut app, KeyCode::Tab);
    }
    assert_eq!(app.state().step, WizardStep::Review);

    assert!(press(&mut app, KeyCode::Enter));
    let plan = app.finished().unwrap();
    assert_eq!(plan.summary.activities, 45.0);
    assert!(path.exists());
}

#[test]
fn test_save_without_path_reports_status() {
    let mut app = app();
    for _ in 0..4 {
        press(&mut app, KeyCode::Tab);
    }
    assert!(!press(&mut app, KeyCode::Char('s')));
    assert!(app.state().status_message.contains("--save"));
}

// =============================================================================
// Rendering Tests
// =============================================================================

#[test]
fn test_every_step_renders() {
    let mut app = app();
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();

    for _ in 0..WizardStep::TOTAL_STEPS {
        app.draw(&mut terminal).unwrap();
        press(&mut app, KeyCode::Tab);
    }

    press(&mut app, KeyCode::Char('?'));
    app.draw(&mut terminal).unwrap();
}

#[test]
fn test_transport_screen_shows_segment_headings() {
    let mut app = app();
    for _ in 0..3 {
        press(&mut app, KeyCode::Tab);
    }
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    app.draw(&mut terminal).unwrap();

    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(screen.contains("Suggested routes"));
    assert!(screen.contains("Outbound Journey"));
}

#[test]
fn test_renders_in_tiny_terminal() {
    let mut app = app();
    let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
    press(&mut app, KeyCode::Enter);
    app.draw(&mut terminal).unwrap();
}
