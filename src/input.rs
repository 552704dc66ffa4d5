//! Input handling module
//!
//! Handles the planner's popups: free-text input for request fields, search
//! queries and notes, and selection from a fixed list of options.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;

/// Types of input dialogs
#[derive(Debug, Clone, PartialEq)]
pub enum InputType {
    /// Text input for values like destination, budget or a note
    TextInput {
        field_name: String,
        current_value: String,
        placeholder: String,
    },
    /// Selection from predefined options
    Selection {
        field_name: String,
        options: Vec<String>,
        list_state: ListState,
    },
}

/// Input dialog state
#[derive(Debug, Clone)]
pub struct InputDialog {
    /// Type of input dialog
    pub input_type: InputType,
    /// Title of the dialog
    pub title: String,
    /// Instructions for the user
    pub instructions: String,
}

impl InputDialog {
    /// Create a new input dialog
    pub fn new(input_type: InputType, title: String, instructions: String) -> Self {
        Self {
            input_type,
            title,
            instructions,
        }
    }

    /// Handle keyboard input for the dialog
    pub fn handle_input(&mut self, key_event: KeyEvent) -> InputResult {
        match &mut self.input_type {
            InputType::TextInput { current_value, .. } => match key_event.code {
                KeyCode::Enter => {
                    return InputResult::Confirm(current_value.trim().to_string());
                }
                KeyCode::Esc => {
                    return InputResult::Cancel;
                }
                KeyCode::Backspace => {
                    current_value.pop();
                }
                KeyCode::Char(c) => {
                    current_value.push(c);
                }
                _ => {}
            },
            InputType::Selection {
                options,
                list_state,
                ..
            } => match key_event.code {
                KeyCode::Up => {
                    let i = list_state.selected().unwrap_or(0);
                    list_state.select(Some(i.saturating_sub(1)));
                }
                KeyCode::Down => {
                    let i = list_state.selected().unwrap_or(0);
                    if i + 1 < options.len() {
                        list_state.select(Some(i + 1));
                    }
                }
                KeyCode::Enter => {
                    if let Some(option) = list_state.selected().and_then(|i| options.get(i)) {
                        return InputResult::Confirm(option.clone());
                    }
                }
                KeyCode::Esc => {
                    return InputResult::Cancel;
                }
                _ => {}
            },
        }
        InputResult::Continue
    }

    /// Get the current display value for the input
    pub fn get_display_value(&self) -> String {
        match &self.input_type {
            InputType::TextInput {
                current_value,
                placeholder,
                ..
            } => {
                if current_value.is_empty() {
                    placeholder.clone()
                } else {
                    current_value.clone()
                }
            }
            InputType::Selection {
                options,
                list_state,
                ..
            } => list_state
                .selected()
                .and_then(|i| options.get(i))
                .cloned()
                .unwrap_or_default(),
        }
    }
}

/// Result of input handling
#[derive(Debug, Clone, PartialEq)]
pub enum InputResult {
    /// User confirmed with a value
    Confirm(String),
    /// User cancelled
    Cancel,
    /// Continue processing input
    Continue,
}

/// Input handler owning the active dialog, if any
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Current active dialog
    pub current_dialog: Option<InputDialog>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            current_dialog: None,
        }
    }

    /// Start a text input dialog
    pub fn start_text_input(
        &mut self,
        field_name: String,
        current_value: String,
        placeholder: String,
    ) {
        let input_type = InputType::TextInput {
            field_name: field_name.clone(),
            current_value,
            placeholder,
        };

        self.current_dialog = Some(InputDialog::new(
            input_type,
            format!("Edit {}", field_name),
            "Type the value and press Enter to confirm, Esc to cancel".to_string(),
        ));
    }

    /// Start a selection dialog, highlighting `current_value` when present
    pub fn start_selection(&mut self, field_name: String, options: Vec<String>, current_value: &str) {
        let selected_index = options
            .iter()
            .position(|opt| opt == current_value)
            .unwrap_or(0);

        let mut list_state = ListState::default();
        if !options.is_empty() {
            list_state.select(Some(selected_index));
        }

        let input_type = InputType::Selection {
            field_name: field_name.clone(),
            options,
            list_state,
        };

        self.current_dialog = Some(InputDialog::new(
            input_type,
            format!("Select {}", field_name),
            "Use ↑↓ to navigate, Enter to select, Esc to cancel".to_string(),
        ));
    }

    /// Handle keyboard input for the current dialog.
    ///
    /// Returns the confirmed value; the dialog closes on confirm or cancel.
    pub fn handle_input(&mut self, key_event: KeyEvent) -> Option<String> {
        if let Some(ref mut dialog) = self.current_dialog {
            match dialog.handle_input(key_event) {
                InputResult::Confirm(value) => {
                    self.current_dialog = None;
                    Some(value)
                }
                InputResult::Cancel => {
                    self.current_dialog = None;
                    None
                }
                InputResult::Continue => None,
            }
        } else {
            None
        }
    }

    /// Check if a dialog is currently active
    pub fn is_dialog_active(&self) -> bool {
        self.current_dialog.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_text_input_typing_and_confirm() {
        let mut handler = InputHandler::new();
        handler.start_text_input("Budget".into(), "20".into(), "2000".into());
        assert!(handler.is_dialog_active());

        assert_eq!(handler.handle_input(key(KeyCode::Char('0'))), None);
        assert_eq!(handler.handle_input(key(KeyCode::Char('0'))), None);
        assert_eq!(handler.handle_input(key(KeyCode::Backspace)), None);
        assert_eq!(
            handler.handle_input(key(KeyCode::Enter)),
            Some("200".to_string())
        );
        assert!(!handler.is_dialog_active());
    }

    #[test]
    fn test_text_input_cancel() {
        let mut handler = InputHandler::new();
        handler.start_text_input("Destination".into(), String::new(), "Bali".into());
        assert_eq!(handler.handle_input(key(KeyCode::Esc)), None);
        assert!(!handler.is_dialog_active());
    }

    #[test]
    fn test_placeholder_shown_when_empty() {
        let dialog = InputDialog::new(
            InputType::TextInput {
                field_name: "Destination".into(),
                current_value: String::new(),
                placeholder: "e.g. Bali, Indonesia".into(),
            },
            "Edit Destination".into(),
            String::new(),
        );
        assert_eq!(dialog.get_display_value(), "e.g. Bali, Indonesia");
    }

    #[test]
    fn test_selection_navigation() {
        let mut handler = InputHandler::new();
        let options = vec!["Bali".to_string(), "Tokyo".to_string(), "Dubai".to_string()];
        handler.start_selection("Featured Trip".into(), options, "Tokyo");

        handler.handle_input(key(KeyCode::Down));
        handler.handle_input(key(KeyCode::Down));
        assert_eq!(
            handler.handle_input(key(KeyCode::Enter)),
            Some("Dubai".to_string())
        );
    }

    #[test]
    fn test_empty_selection_never_confirms() {
        let mut handler = InputHandler::new();
        handler.start_selection("Featured Trip".into(), Vec::new(), "");
        assert_eq!(handler.handle_input(key(KeyCode::Enter)), None);
        assert!(handler.is_dialog_active());
    }
}
