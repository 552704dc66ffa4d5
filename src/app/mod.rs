//! Application module
//!
//! Contains the interactive planner: the event loop, key handling and the
//! bridge between dialogs and the planning session.
//!
//! # Module Structure
//! - `state` - View state types (AppState, RequestField, PendingEdit)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppState, PendingEdit, RequestField, move_cursor};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::currency::Currency;
use crate::error::Result;
use crate::input::InputHandler;
use crate::plan::TripPlan;
use crate::session::PlannerSession;
use crate::theme::LayoutConstants;
use crate::types::Step;
use crate::ui::{PlannerView, UiRenderer};
use crate::wizard::WizardStep;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Longest wait for input between redraws
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Main application struct
pub struct App {
    state: AppState,
    session: PlannerSession,
    currency: Currency,
    ui_renderer: UiRenderer,
    input_handler: InputHandler,
    keybinding_context: KeybindingContext,
    save_path: Option<PathBuf>,
    /// Plan produced when the user finishes on the review screen
    finished: Option<TripPlan>,
}

impl App {
    /// Create a new application around a planning session
    pub fn new(session: PlannerSession, currency: Currency, save_path: Option<PathBuf>) -> Self {
        info!("Creating new App instance");
        let mut app = Self {
            state: AppState::default(),
            session,
            currency,
            ui_renderer: UiRenderer::new(),
            input_handler: InputHandler::new(),
            keybinding_context: KeybindingContext::new(),
            save_path,
            finished: None,
        };
        app.reset_catalog_cursors();
        app
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn session(&self) -> &PlannerSession {
        &self.session
    }

    pub fn input_handler(&self) -> &InputHandler {
        &self.input_handler
    }

    /// The plan produced by finishing on the review screen
    pub fn finished(&self) -> Option<&TripPlan> {
        self.finished.as_ref()
    }

    /// Toggle help overlay visibility
    pub fn toggle_help(&mut self) {
        self.state.help_visible = !self.state.help_visible;
    }

    /// Run the main application loop.
    ///
    /// Returns the finished plan, or `None` when the user quit early.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<Option<TripPlan>> {
        info!("Starting main application loop");

        loop {
            self.session.tick();
            self.draw(terminal)?;

            if crossterm::event::poll(self.poll_timeout(Instant::now()))? {
                match crossterm::event::read()? {
                    Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                        if self.handle_key_event(key_event) {
                            break;
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                    }
                    _ => {}
                }
            }
        }

        info!(finished = self.finished.is_some(), "Leaving main application loop");
        Ok(self.finished)
    }

    /// Draw one frame
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let view = PlannerView {
            state: &self.state,
            session: &self.session,
            currency: self.currency,
        };
        let ui_renderer = &self.ui_renderer;
        let input_handler = &mut self.input_handler;
        let keybinding_ctx = &self.keybinding_context;
        terminal.draw(|f| ui_renderer.render(f, &view, input_handler, keybinding_ctx))?;
        Ok(())
    }

    /// How long to wait for input: until the next refresh settles, at most
    /// [`POLL_INTERVAL`].
    fn poll_timeout(&self, now: Instant) -> Duration {
        self.session
            .next_refresh_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .map_or(POLL_INTERVAL, |left| left.min(POLL_INTERVAL))
    }

    /// Handle keyboard input events.
    ///
    /// Returns `true` when the app should exit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        // Help overlay swallows everything but its own dismissal
        if self.state.help_visible {
            if matches!(
                key_event.code,
                crossterm::event::KeyCode::Char('?') | crossterm::event::KeyCode::Esc
            ) {
                self.toggle_help();
            }
            return false;
        }

        if self.input_handler.is_dialog_active() {
            if let Some(value) = self.input_handler.handle_input(key_event) {
                if let Some(edit) = self.state.pending_edit.take() {
                    self.apply_edit(edit, value);
                }
            } else if !self.input_handler.is_dialog_active() {
                self.state.pending_edit = None;
            }
            return false;
        }

        let step = self.state.step;
        let Some(action) = self.keybinding_context.action_for(step, &key_event) else {
            return false;
        };
        debug!(?action, %step, "Key action");

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.toggle_help(),
            KeyAction::NextStep => self.go_to(step.next()),
            KeyAction::PreviousStep => self.go_to(step.previous()),
            KeyAction::NavigateUp => self.move_cursor(-1),
            KeyAction::NavigateDown => self.move_cursor(1),
            KeyAction::PageUp => self.move_cursor(-(LayoutConstants::PAGE_SCROLL_SIZE as isize)),
            KeyAction::PageDown => self.move_cursor(LayoutConstants::PAGE_SCROLL_SIZE as isize),
            KeyAction::Home => self.move_cursor(isize::MIN / 2),
            KeyAction::End => self.move_cursor(isize::MAX / 2),
            KeyAction::Edit => self.start_field_edit(),
            KeyAction::FeaturedTrip => self.start_featured_trip_selection(),
            KeyAction::Toggle => self.toggle_highlighted(),
            KeyAction::Search => {
                if let Some(s) = step.catalog_step() {
                    self.state.pending_edit = Some(PendingEdit::Search(s));
                    self.input_handler.start_text_input(
                        format!("{} Search", s.label()),
                        self.state.search(s).to_string(),
                        "name, type or place".to_string(),
                    );
                }
            }
            KeyAction::ClearSearch => {
                if let Some(s) = step.catalog_step() {
                    self.set_search(s, String::new());
                }
            }
            KeyAction::Note => {
                if let Some(s) = step.catalog_step() {
                    self.state.pending_edit = Some(PendingEdit::Note(s));
                    self.input_handler.start_text_input(
                        format!("{} Note", s.label()),
                        self.session.custom_input(s).to_string(),
                        "anything else we should know".to_string(),
                    );
                }
            }
            KeyAction::Save => {
                let plan = self.session.plan();
                self.save_plan(&plan);
            }
            KeyAction::Finish => {
                let plan = self.session.plan();
                info!(id = %plan.id, "Trip plan finished");
                if self.save_path.is_some() {
                    self.save_plan(&plan);
                }
                self.finished = Some(plan);
                return true;
            }
        }
        false
    }

    fn go_to(&mut self, next: Option<WizardStep>) {
        if let Some(next) = next {
            debug!(from = %self.state.step, to = %next, "Changing step");
            self.state.step = next;
            self.state.status_message = format!(
                "Step {}/{}: {}",
                next.step_number(),
                WizardStep::TOTAL_STEPS,
                next.title()
            );
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        match self.state.step {
            WizardStep::Destination => {
                move_cursor(&mut self.state.field_list, RequestField::count(), delta)
            }
            WizardStep::Review => {
                let scroll = i64::from(self.state.review_scroll) + delta as i64;
                self.state.review_scroll = scroll.clamp(0, i64::from(u16::MAX)) as u16;
            }
            step => {
                if let Some(s) = step.catalog_step() {
                    let len = self.visible_ids(s).len();
                    move_cursor(self.state.catalog_list_mut(s), len, delta);
                }
            }
        }
    }

    /// Ids in the step's list as currently displayed
    fn visible_ids(&self, step: Step) -> Vec<String> {
        self.session
            .search(step, self.state.search(step))
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn toggle_highlighted(&mut self) {
        let Some(step) = self.state.step.catalog_step() else {
            return;
        };
        let ids = self.visible_ids(step);
        let Some(id) = self
            .state
            .catalog_list(step)
            .selected()
            .and_then(|i| ids.get(i))
        else {
            return;
        };

        let before: Vec<usize> = [Step::Activities, Step::Accommodation, Step::Transportation]
            .iter()
            .map(|s| self.session.selections().get(*s).len())
            .collect();
        let selected = self.session.toggle(step, id);

        let cleared: Vec<&str> = [Step::Activities, Step::Accommodation, Step::Transportation]
            .iter()
            .zip(before)
            .filter(|(s, n)| **s != step && *n > 0 && self.session.selections().get(**s).is_empty())
            .map(|(s, _)| s.label())
            .collect();

        self.state.status_message = match (selected, cleared.is_empty()) {
            (true, true) => format!("Added to {}", step.label()),
            (false, true) => format!("Removed from {}", step.label()),
            (true, false) => format!("Added to {}; cleared {}", step.label(), cleared.join(", ")),
            (false, false) => {
                format!("Removed from {}; cleared {}", step.label(), cleared.join(", "))
            }
        };
    }

    fn start_field_edit(&mut self) {
        let Some(field) = self.state.current_field() else {
            return;
        };
        self.state.pending_edit = Some(PendingEdit::Field(field));
        self.input_handler.start_text_input(
            field.label().to_string(),
            field.current_value(self.session.request()),
            field.placeholder().to_string(),
        );
    }

    fn start_featured_trip_selection(&mut self) {
        let names: Vec<String> = self
            .session
            .provider()
            .featured_trips()
            .iter()
            .map(|trip| trip.name.clone())
            .collect();
        if names.is_empty() {
            self.state.status_message = "No featured trips available".to_string();
            return;
        }
        let current = self
            .session
            .provider()
            .featured_trip_for(self.session.request())
            .map(|trip| trip.name.clone())
            .unwrap_or_default();
        self.state.pending_edit = Some(PendingEdit::FeaturedTrip);
        self.input_handler
            .start_selection("Featured Trip".to_string(), names, &current);
    }

    /// Route a confirmed dialog value to what it was editing
    fn apply_edit(&mut self, edit: PendingEdit, value: String) {
        match edit {
            PendingEdit::Field(field) => match field.parse(&value, self.session.request()) {
                Ok(patch) => {
                    let invalidation = self.session.update_request(patch);
                    self.state.status_message = if invalidation.is_none() {
                        format!("{} unchanged", field.label())
                    } else if invalidation.cleared.is_empty() {
                        format!("{} updated", field.label())
                    } else {
                        format!("{} updated; selections reset", field.label())
                    };
                    self.reset_catalog_cursors();
                }
                Err(e) => {
                    warn!("Rejected {} input: {}", field.label(), e);
                    self.state.status_message = e.to_string();
                }
            },
            PendingEdit::FeaturedTrip => {
                let location = self
                    .session
                    .provider()
                    .featured_trips()
                    .iter()
                    .find(|trip| trip.name == value)
                    .map(|trip| trip.location.clone());
                if let Some(location) = location {
                    self.apply_edit(PendingEdit::Field(RequestField::Destination), location);
                }
            }
            PendingEdit::Search(step) => self.set_search(step, value),
            PendingEdit::Note(step) => {
                self.session.set_custom_input(step, value);
                self.state.status_message = format!("{} note saved", step.label());
            }
        }
    }

    fn set_search(&mut self, step: Step, query: String) {
        self.state.searches[step.index()] = query;
        let len = self.visible_ids(step).len();
        let list = self.state.catalog_list_mut(step);
        list.select(if len == 0 { None } else { Some(0) });
    }

    fn reset_catalog_cursors(&mut self) {
        for step in [Step::Activities, Step::Accommodation, Step::Transportation] {
            let len = self.visible_ids(step).len();
            let list = self.state.catalog_list_mut(step);
            list.select(if len == 0 { None } else { Some(0) });
        }
    }

    fn save_plan(&mut self, plan: &TripPlan) {
        let Some(path) = self.save_path.clone() else {
            self.state.status_message =
                "No save path given; use --save to write the plan".to_string();
            return;
        };
        if let Err(e) = plan.request.validate() {
            self.state.status_message = format!("Cannot save yet: {}", e);
            return;
        }
        self.state.status_message = match plan.save_to_file(&path) {
            Ok(()) => format!("Saved plan to {}", path.display()),
            Err(e) => {
                warn!("Failed to save plan: {:#}", e);
                format!("Failed to save plan: {:#}", e)
            }
        };
    }
}
