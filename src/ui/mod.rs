//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - Title, step progress, cost bar, status and nav bar
//! - `screens` - The wizard screens (destination, catalogs, review)
//! - `dialogs` - Input and selection dialog rendering

mod dialogs;
mod header;
pub mod screens;

use crate::app::AppState;
use crate::components::keybindings::KeybindingContext;
use crate::currency::Currency;
use crate::input::InputHandler;
use crate::session::PlannerSession;
use crate::theme::LayoutConstants;
use crate::wizard::WizardStep;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub use header::HeaderRenderer;

/// Everything a frame is drawn from
pub struct PlannerView<'a> {
    pub state: &'a AppState,
    pub session: &'a PlannerSession,
    pub currency: Currency,
}

/// Centered sub-rectangle taking the given percentages of `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// UI renderer for the application
///
/// This is the main entry point for UI rendering. It delegates to specialized
/// submodules for different parts of the UI.
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the complete UI
    pub fn render(
        &self,
        f: &mut Frame,
        view: &PlannerView<'_>,
        input_handler: &mut InputHandler,
        keybinding_ctx: &KeybindingContext,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(LayoutConstants::TITLE_HEIGHT),
                Constraint::Length(1), // Step progress
                Constraint::Min(3),    // Screen body
                Constraint::Length(LayoutConstants::COST_BAR_HEIGHT),
                Constraint::Length(1), // Status
                Constraint::Length(LayoutConstants::NAV_BAR_HEIGHT),
            ])
            .split(f.area());

        let step = view.state.step;
        self.header.render_title(f, chunks[0], view.session, step);
        header::render_step_progress(f, chunks[1], step);

        match step {
            WizardStep::Destination => screens::render_destination_screen(f, chunks[2], view),
            WizardStep::Activities | WizardStep::Accommodation | WizardStep::Transportation => {
                if let Some(catalog_step) = step.catalog_step() {
                    screens::render_catalog_screen(f, chunks[2], view, catalog_step);
                }
            }
            WizardStep::Review => screens::render_review_screen(f, chunks[2], view),
        }

        header::render_cost_bar(f, chunks[3], &view.session.cost_summary(), view.currency);
        header::render_status(f, chunks[4], &view.state.status_message);
        header::render_nav_bar(f, chunks[5], step, keybinding_ctx);

        if input_handler.is_dialog_active() {
            dialogs::render_input_dialog(f, input_handler);
        } else if view.state.help_visible {
            header::render_help_overlay(f, step, keybinding_ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 50, area);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 20);
        assert_eq!(inner.y, 10);
    }
}
