//! Reusable TUI components
//!
//! - `keybindings` - Step-aware keybinding registry
//! - `help_overlay` - Floating help window built from the registry

pub mod help_overlay;
pub mod keybindings;
