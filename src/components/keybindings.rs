//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change with the wizard step.
//! The app resolves key events through [`KeybindingContext::action_for`], so
//! the nav bar, the help overlay and the event handler all read the same
//! table.

use crate::wizard::WizardStep;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    PageUp,
    PageDown,
    Home,
    End,
    /// Edit the highlighted request field
    Edit,
    /// Pick a featured trip as the destination
    FeaturedTrip,
    /// Select or deselect the highlighted catalog item
    Toggle,
    Search,
    ClearSearch,
    /// Edit the free-text note for the step
    Note,
    NextStep,
    PreviousStep,
    Save,
    Finish,
    Quit,
    Help,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        if self.key != event.code {
            return false;
        }
        // Terminals report BackTab with or without SHIFT
        if self.key == KeyCode::BackTab {
            return true;
        }
        event.modifiers.difference(KeyModifiers::SHIFT) == self.modifiers
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Step-specific keybindings
    step_bindings: HashMap<WizardStep, Vec<Keybinding>>,
    /// Global keybindings (available on every step)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            step_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Tab, KeyAction::NextStep, "Tab", "Next step"),
            Keybinding::new(KeyCode::BackTab, KeyAction::PreviousStep, "S-Tab", "Previous step"),
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        let list_nav = [
            Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Navigate up"),
            Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Navigate down"),
            Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up"),
            Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down"),
            Keybinding::new(KeyCode::Home, KeyAction::Home, "Home", "Go to first"),
            Keybinding::new(KeyCode::End, KeyAction::End, "End", "Go to last"),
        ];

        // Destination
        let mut destination = list_nav.to_vec();
        destination.extend([
            Keybinding::new(KeyCode::Enter, KeyAction::Edit, "Enter", "Edit field"),
            Keybinding::new(KeyCode::Char('f'), KeyAction::FeaturedTrip, "F", "Featured trips"),
        ]);
        self.step_bindings.insert(WizardStep::Destination, destination);

        // Catalog steps
        let mut catalog = list_nav.to_vec();
        catalog.extend([
            Keybinding::new(KeyCode::Char(' '), KeyAction::Toggle, "Space", "Select/deselect"),
            Keybinding::new(KeyCode::Enter, KeyAction::Toggle, "Enter", "Select/deselect"),
            Keybinding::new(KeyCode::Char('/'), KeyAction::Search, "/", "Search"),
            Keybinding::new(KeyCode::Esc, KeyAction::ClearSearch, "Esc", "Clear search"),
            Keybinding::new(KeyCode::Char('n'), KeyAction::Note, "N", "Add a note"),
            Keybinding::new(KeyCode::Char('b'), KeyAction::PreviousStep, "B", "Back"),
        ]);
        for step in WizardStep::iter().filter(|s| s.catalog_step().is_some()) {
            self.step_bindings.insert(step, catalog.clone());
        }

        // Review
        self.step_bindings.insert(
            WizardStep::Review,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Scroll up"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Scroll down"),
                Keybinding::new(KeyCode::Char('s'), KeyAction::Save, "S", "Save plan"),
                Keybinding::new(KeyCode::Enter, KeyAction::Finish, "Enter", "Finish"),
                Keybinding::new(KeyCode::Char('b'), KeyAction::PreviousStep, "B", "Back"),
            ],
        );
    }

    /// Get keybindings for a step (includes global bindings)
    pub fn get_bindings(&self, step: WizardStep) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();
        if let Some(step_bindings) = self.step_bindings.get(&step) {
            bindings.extend(step_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());
        bindings
    }

    /// Resolve a key event to the action bound on `step`
    pub fn action_for(&self, step: WizardStep, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(step)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, step: WizardStep) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(step);

        let priority_actions = match step {
            WizardStep::Destination => vec![
                KeyAction::NavigateUp,
                KeyAction::Edit,
                KeyAction::FeaturedTrip,
                KeyAction::NextStep,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            WizardStep::Activities | WizardStep::Accommodation | WizardStep::Transportation => {
                vec![
                    KeyAction::NavigateUp,
                    KeyAction::Toggle,
                    KeyAction::Search,
                    KeyAction::Note,
                    KeyAction::NextStep,
                    KeyAction::PreviousStep,
                    KeyAction::Help,
                ]
            }
            WizardStep::Review => vec![
                KeyAction::NavigateUp,
                KeyAction::Save,
                KeyAction::Finish,
                KeyAction::PreviousStep,
                KeyAction::Quit,
            ],
        };

        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            if action == KeyAction::NavigateUp {
                // Up/Down shown as one item
                items.push(NavBarItem {
                    key_display: "Up/Dn".to_string(),
                    action_label: if step == WizardStep::Review {
                        "Scroll".to_string()
                    } else {
                        "Navigate".to_string()
                    },
                });
                continue;
            }
            if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                items.push(NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                });
            }
        }
        items
    }

    /// Get full help content for a step (for help overlay)
    pub fn get_help_content(&self, step: WizardStep) -> Vec<HelpSection> {
        let groups: [(&str, fn(KeyAction) -> bool); 3] = [
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::PageUp
                        | KeyAction::PageDown
                        | KeyAction::Home
                        | KeyAction::End
                )
            }),
            ("Actions", |a| {
                matches!(
                    a,
                    KeyAction::Edit
                        | KeyAction::FeaturedTrip
                        | KeyAction::Toggle
                        | KeyAction::Search
                        | KeyAction::ClearSearch
                        | KeyAction::Note
                        | KeyAction::Save
                        | KeyAction::Finish
                )
            }),
            ("General", |a| {
                matches!(
                    a,
                    KeyAction::NextStep | KeyAction::PreviousStep | KeyAction::Help | KeyAction::Quit
                )
            }),
        ];

        let bindings = self.get_bindings(step);
        groups
            .into_iter()
            .filter_map(|(title, wanted)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| wanted(b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
