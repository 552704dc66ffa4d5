//! Centralized theme and styling for the TUI
//!
//! Single source of truth for the colors and styles used by the planner
//! screens. Components should not hardcode colors.
//!
//! # Usage
//! ```rust
//! use holiday_planner::theme::{Colors, Styles, Theme};
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! let budget_style = Theme::budget_style(true);
//! ```

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    // -------------------------------------------------------------------------
    // Base Colors (backgrounds, foregrounds)
    // -------------------------------------------------------------------------

    /// Dark background for dialogs and overlays
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Gauge/progress bar background
    pub const BG_GAUGE: Color = Color::Rgb(40, 40, 50);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Accent Colors
    // -------------------------------------------------------------------------

    /// Borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Selected items, emphasis
    pub const SECONDARY: Color = Color::Yellow;

    // -------------------------------------------------------------------------
    // Semantic Colors
    // -------------------------------------------------------------------------

    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
    pub const INFO: Color = Color::Blue;

    // -------------------------------------------------------------------------
    // UI Element Colors
    // -------------------------------------------------------------------------

    pub const BORDER_ACTIVE: Color = Color::Cyan;
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Highlighted list row background
    pub const SELECTED_BG: Color = Color::Yellow;

    /// Highlighted list row foreground
    pub const SELECTED_FG: Color = Color::Black;

    /// Check mark of a chosen catalog item
    pub const CHOSEN: Color = Color::Green;

    /// Price column
    pub const PRICE: Color = Color::LightGreen;

    /// Rating column
    pub const RATING: Color = Color::LightYellow;

    /// Navigation hints
    pub const NAV_HINT: Color = Color::DarkGray;

    /// Catalog that is settling after a change
    pub const REFRESHING: Color = Color::Magenta;

    // -------------------------------------------------------------------------
    // Wizard Step Colors
    // -------------------------------------------------------------------------

    pub const STEP_ACTIVE: Color = Color::Yellow;
    pub const STEP_COMPLETE: Color = Color::Green;
    pub const STEP_PENDING: Color = Color::Gray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI elements
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Screen and dialog titles
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Section headers inside a panel
    pub fn header() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    pub fn panel_bg() -> Style {
        Style::default().bg(Colors::BG_PRIMARY)
    }

    /// Highlighted list row
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn chosen() -> Style {
        Style::default()
            .fg(Colors::CHOSEN)
            .add_modifier(Modifier::BOLD)
    }

    pub fn price() -> Style {
        Style::default().fg(Colors::PRICE)
    }

    pub fn rating() -> Style {
        Style::default().fg(Colors::RATING)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Colors::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }

    pub fn info() -> Style {
        Style::default().fg(Colors::INFO)
    }

    pub fn refreshing() -> Style {
        Style::default()
            .fg(Colors::REFRESHING)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }

    /// Key name shown in the nav bar and help overlay
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }
}

// =============================================================================
// SEMANTIC THEMING
// =============================================================================

/// Styles derived from planner state
pub struct Theme;

impl Theme {
    /// Style of a wizard step marker in the progress line
    pub fn step_style(completed: bool, active: bool) -> Style {
        if active {
            Style::default()
                .fg(Colors::STEP_ACTIVE)
                .add_modifier(Modifier::BOLD)
        } else if completed {
            Style::default().fg(Colors::STEP_COMPLETE)
        } else {
            Style::default().fg(Colors::STEP_PENDING)
        }
    }

    /// Gauge and status color for the cost summary
    pub fn budget_style(within_budget: bool) -> Style {
        if within_budget {
            Style::default().fg(Colors::SUCCESS).bg(Colors::BG_GAUGE)
        } else {
            Style::default().fg(Colors::ERROR).bg(Colors::BG_GAUGE)
        }
    }

    /// Check box text for a catalog row
    pub fn check_box(chosen: bool) -> &'static str {
        if chosen { "[x]" } else { "[ ]" }
    }
}

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================

/// Standard layout dimensions
pub struct LayoutConstants;

impl LayoutConstants {
    /// Dialog width as percentage of screen
    pub const DIALOG_WIDTH_PCT: u16 = 60;

    /// Maximum dialog width in columns
    pub const DIALOG_MAX_WIDTH: u16 = 80;

    /// Minimum dialog width in columns
    pub const DIALOG_MIN_WIDTH: u16 = 40;

    /// Height of the navigation bar
    pub const NAV_BAR_HEIGHT: u16 = 1;

    /// Height of the title block
    pub const TITLE_HEIGHT: u16 = 3;

    /// Height of the cost gauge block
    pub const COST_BAR_HEIGHT: u16 = 3;

    /// Rows moved by PageUp/PageDown
    pub const PAGE_SCROLL_SIZE: usize = 10;
}
