use ratatui::style::{Color, Modifier, Style};

use crate::navigation::NavStyle;

// ─── Color Palette (terminal-adaptive, transparency-friendly) ──────────

/// Background: always Reset so the terminal background shows through
pub const BG: Color = Color::Reset;

/// Primary text color
pub const FG: Color = Color::White;

/// Dimmed text (labels, inactive elements)
pub const FG_DIM: Color = Color::DarkGray;

/// Border color
pub const BORDER: Color = Color::DarkGray;

pub const SUCCESS: Color = Color::Green;
pub const ERROR: Color = Color::Red;

/// Styles for the chrome around the navigation bar. The accent follows the
/// navigation's circle color so the page and the bar match.
#[derive(Debug, Clone)]
pub struct Theme {
    pub fg: Color,
    pub fg_dim: Color,
    pub accent: Color,
    pub border: Color,
    pub success: Color,
    pub error: Color,
    pub title: Style,
    pub help_key: Style,
    pub help_desc: Style,
    pub status_bar: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::with_accent(Color::Cyan)
    }
}

impl Theme {
    pub fn with_accent(accent: Color) -> Self {
        Self {
            fg: FG,
            fg_dim: FG_DIM,
            accent,
            border: BORDER,
            success: SUCCESS,
            error: ERROR,
            title: Style::default()
                .fg(accent)
                .bg(BG)
                .add_modifier(Modifier::BOLD),
            help_key: Style::default()
                .fg(accent)
                .bg(BG)
                .add_modifier(Modifier::BOLD),
            help_desc: Style::default().fg(FG_DIM).bg(BG),
            status_bar: Style::default().fg(FG).bg(BG),
        }
    }

    pub fn for_navigation(style: &NavStyle) -> Self {
        Self::with_accent(style.circle_color.to_color())
    }
}
