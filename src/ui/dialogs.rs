//! Dialog rendering module
//!
//! Draws the active input dialog over the current screen.

use crate::input::{InputHandler, InputType};
use crate::theme::{Colors, LayoutConstants, Styles};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

/// Render the active input dialog, if any
pub fn render_input_dialog(f: &mut Frame, input_handler: &mut InputHandler) {
    let Some(ref mut dialog) = input_handler.current_dialog else {
        return;
    };
    let area = f.area();

    let height = match &dialog.input_type {
        InputType::TextInput { .. } => 9,
        InputType::Selection { options, .. } => (options.len() as u16 + 8).min(area.height),
    };
    let dialog_area = dialog_rect(area, height);
    f.render_widget(Clear, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(2), // Instructions
            Constraint::Min(3),    // Content
        ])
        .split(dialog_area);

    let dialog_bg = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::panel_bg().fg(Colors::FG_PRIMARY));
    f.render_widget(dialog_bg, dialog_area);

    let title = Paragraph::new(dialog.title.clone())
        .alignment(Alignment::Center)
        .style(Styles::header());
    f.render_widget(title, chunks[0]);

    let instructions = Paragraph::new(dialog.instructions.clone())
        .alignment(Alignment::Center)
        .style(Styles::text_secondary());
    f.render_widget(instructions, chunks[1]);

    let display_value = dialog.get_display_value();
    match &mut dialog.input_type {
        InputType::TextInput { current_value, .. } => {
            let style = if current_value.is_empty() {
                Styles::text_muted()
            } else {
                Style::default().fg(Colors::SUCCESS)
            };
            let input_widget = Paragraph::new(format!("{}_", display_value))
                .block(Block::default().borders(Borders::ALL).title("Input"))
                .style(style);
            f.render_widget(input_widget, chunks[2]);
        }
        InputType::Selection {
            options,
            list_state,
            ..
        } => {
            let items: Vec<ListItem> = options
                .iter()
                .map(|option| ListItem::new(option.clone()))
                .collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title("Options"))
                .highlight_style(Styles::selected())
                .highlight_symbol("> ");
            f.render_stateful_widget(list, chunks[2], list_state);
        }
    }
}

fn dialog_rect(area: Rect, height: u16) -> Rect {
    let pct = u32::from(area.width) * u32::from(LayoutConstants::DIALOG_WIDTH_PCT) / 100;
    let width = (pct as u16)
        .clamp(LayoutConstants::DIALOG_MIN_WIDTH, LayoutConstants::DIALOG_MAX_WIDTH)
        .min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
