//! Header and common widget rendering
//!
//! Title block, wizard progress line, cost gauge, status line, navigation
//! bar and the help overlay.

use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::cost::CostSummary;
use crate::currency::Currency;
use crate::session::PlannerSession;
use crate::theme::{Colors, Styles, Theme};
use crate::wizard::WizardStep;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use strum::IntoEnumIterator;

/// Header renderer for the title block
pub struct HeaderRenderer {
    app_name: &'static str,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    pub fn new() -> Self {
        Self {
            app_name: "Holiday Planner",
        }
    }

    /// Render the title block for the current step
    pub fn render_title(&self, f: &mut Frame, area: Rect, session: &PlannerSession, step: WizardStep) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let destination = session.request().destination.trim();
        let mut spans = vec![
            Span::styled(self.app_name, Styles::title()),
            Span::styled("  |  ", Styles::text_muted()),
            Span::styled(step.title(), Styles::header()),
        ];
        if !destination.is_empty() {
            spans.push(Span::styled("  |  ", Styles::text_muted()));
            spans.push(Span::styled(destination.to_string(), Styles::text()));
        }

        let title = Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::border_active()),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, area);
    }
}

/// Render the wizard progress line: `1 Destination > 2 Activities > ...`
pub fn render_step_progress(f: &mut Frame, area: Rect, current: WizardStep) {
    let mut spans = Vec::new();
    for step in WizardStep::iter() {
        if step.step_number() > 1 {
            spans.push(Span::styled(" > ", Styles::text_muted()));
        }
        let completed = step.step_number() < current.step_number();
        let marker = if completed { "✓" } else { "" };
        spans.push(Span::styled(
            format!("{}{} {}", marker, step.step_number(), label(step)),
            Theme::step_style(completed, step == current),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn label(step: WizardStep) -> &'static str {
    match step {
        WizardStep::Destination => "Destination",
        WizardStep::Activities => "Activities",
        WizardStep::Accommodation => "Accommodation",
        WizardStep::Transportation => "Transport",
        WizardStep::Review => "Review",
    }
}

/// Render the running total against the budget
pub fn render_cost_bar(f: &mut Frame, area: Rect, summary: &CostSummary, currency: Currency) {
    let label = if summary.within_budget {
        format!(
            "{} of {} ({} left)",
            currency.format_amount(summary.total),
            currency.format_amount(summary.budget),
            currency.format_amount(summary.remaining)
        )
    } else {
        format!(
            "{} of {} (over by {})",
            currency.format_amount(summary.total),
            currency.format_amount(summary.budget),
            currency.format_amount(-summary.remaining)
        )
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Trip Cost "))
        .gauge_style(Theme::budget_style(summary.within_budget))
        .ratio(summary.spent_ratio())
        .label(label);
    f.render_widget(gauge, area);
}

/// Render the status message line
pub fn render_status(f: &mut Frame, area: Rect, message: &str) {
    let status = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Colors::SECONDARY));
    f.render_widget(status, area);
}

/// Render the navigation bar
pub fn render_nav_bar(f: &mut Frame, area: Rect, step: WizardStep, keybinding_ctx: &KeybindingContext) {
    let mut spans = Vec::new();
    for (i, item) in keybinding_ctx.get_nav_items(step).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Styles::nav_hint()));
        }
        spans.push(Span::styled(format!("[{}]", item.key_display), Styles::key_hint()));
        spans.push(Span::styled(format!(" {}", item.action_label), Styles::nav_hint()));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, step: WizardStep, keybinding_ctx: &KeybindingContext) {
    let area = f.area();
    HelpOverlay::new(step, keybinding_ctx).render(f, area);
}
