//! Layout and timing constants for the terminal front end.

use std::time::Duration;

/// Pixels represented by one terminal row when reporting scroll offsets.
pub const LINE_HEIGHT_PX: f64 = 20.0;

/// Rows moved per mouse-wheel notch.
pub const WHEEL_LINES: usize = 3;

/// Without scroll input for this long, the gesture is reported as ended.
pub const SCROLL_SETTLE: Duration = Duration::from_millis(150);

/// Upper bound on how long the event loop blocks waiting for input.
pub const MAX_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Width of the settings sheet as percentage of screen width.
pub const SHEET_WIDTH_PERCENT: u16 = 60;

/// Height of the settings sheet as percentage of screen height.
pub const SHEET_HEIGHT_PERCENT: u16 = 50;

/// Width of the navigation menu panel in columns.
pub const MENU_PANEL_WIDTH: u16 = 24;

/// Label of the floating menu button.
pub const MENU_BUTTON_LABEL: &str = " ≡ Menu ";

/// Actions offered by the selection toolbar.
pub const SELECTION_ACTIONS: [&str; 4] = ["Highlight", "Note", "Copy", "Share"];

/// Entries listed in the navigation menu.
pub const MENU_ENTRIES: [&str; 4] = ["Books", "Translations", "Collections", "Settings"];
