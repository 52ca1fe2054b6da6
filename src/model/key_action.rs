//! Domain-level keyboard actions independent of key bindings.

/// Reader actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll the passage up by one line. Default: k/↑
    ScrollUp,
    /// Scroll the passage down by one line. Default: j/↓
    ScrollDown,
    /// Scroll up by one page. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one page. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the top of the passage. Default: g/Home
    ScrollToTop,
    /// Jump to the bottom of the passage. Default: G/End
    ScrollToBottom,

    // Chrome collaborators
    /// Open or close the navigation menu. Default: m
    ToggleMenu,
    /// Start or clear a text selection. Default: v
    ToggleSelection,
    /// Focus or leave the search input. Default: /
    ToggleSearch,
    /// Present or dismiss the settings sheet. Default: s
    ToggleSettings,
    /// Flip the "always show controls" preference. Default: p
    TogglePin,
    /// Dismiss the topmost chrome element. Default: Esc
    Dismiss,

    // Application
    /// Quit the application. Default: q
    Quit,
}

impl KeyAction {
    /// Whether this action moves the passage.
    pub fn is_scroll(self) -> bool {
        matches!(
            self,
            KeyAction::ScrollUp
                | KeyAction::ScrollDown
                | KeyAction::PageUp
                | KeyAction::PageDown
                | KeyAction::ScrollToTop
                | KeyAction::ScrollToBottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_actions_are_classified() {
        assert!(KeyAction::ScrollUp.is_scroll());
        assert!(KeyAction::PageDown.is_scroll());
        assert!(KeyAction::ScrollToBottom.is_scroll());
        assert!(!KeyAction::ToggleMenu.is_scroll());
        assert!(!KeyAction::Quit.is_scroll());
    }
}
