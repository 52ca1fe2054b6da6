//! Chrome styling.

use ratatui::style::{Color, Modifier, Style};

/// Top bar carrying the passage title.
pub const TOP_BAR: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Floating menu button.
pub const MENU_BUTTON: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// Selection toolbar.
pub const SELECTION_TOOLBAR: Style = Style::new().fg(Color::White).bg(Color::Magenta);

/// Panel borders (menu, sheet, search).
pub const PANEL_BORDER: Style = Style::new().fg(Color::Cyan);

/// Status line and hints.
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

/// Chapter headings in the passage.
pub const HEADING: Style = Style::new().add_modifier(Modifier::BOLD);

/// Apply the reveal opacity to a style.
///
/// Terminals have no alpha channel, so anything less than fully opaque is
/// rendered dim.
pub fn with_opacity(style: Style, opacity: f32) -> Style {
    if opacity < 1.0 {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}
