//! Prioritized chrome state.

use std::fmt;

/// Visibility state of the reader chrome.
///
/// Variants are declared in ascending priority: when several driving
/// conditions hold at once, the greatest variant wins arbitration. The
/// derived `Ord` follows declaration order, so `max()` over candidate
/// states is the arbitration rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ChromeState {
    /// Default reading mode, chrome hidden.
    #[default]
    Reading,
    /// User preference or accessibility forces the chrome visible.
    UserPinned,
    /// Navigation menu is open.
    MenuVisible,
    /// Search input is focused.
    SearchActive,
    /// A modal sheet is open.
    SheetPresented,
    /// A text selection is in progress. Highest priority.
    SelectionActive,
}

impl ChromeState {
    /// All states in ascending priority order.
    pub const ALL: [ChromeState; 6] = [
        ChromeState::Reading,
        ChromeState::UserPinned,
        ChromeState::MenuVisible,
        ChromeState::SearchActive,
        ChromeState::SheetPresented,
        ChromeState::SelectionActive,
    ];

    /// Numeric priority (0 = Reading, 5 = SelectionActive).
    pub fn priority(self) -> u8 {
        self as u8
    }

    /// Stable, human-readable name used in logs and the status line.
    pub fn name(self) -> &'static str {
        match self {
            ChromeState::Reading => "reading",
            ChromeState::UserPinned => "pinned",
            ChromeState::MenuVisible => "menu",
            ChromeState::SearchActive => "search",
            ChromeState::SheetPresented => "sheet",
            ChromeState::SelectionActive => "selection",
        }
    }
}

impl fmt::Display for ChromeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_follow_declaration_order() {
        let priorities: Vec<u8> = ChromeState::ALL.iter().map(|s| s.priority()).collect();
        assert_eq!(priorities, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn selection_outranks_every_other_state() {
        for state in ChromeState::ALL {
            assert!(ChromeState::SelectionActive >= state);
        }
    }

    #[test]
    fn default_is_reading() {
        assert_eq!(ChromeState::default(), ChromeState::Reading);
    }

    #[test]
    fn display_uses_stable_name() {
        assert_eq!(ChromeState::SheetPresented.to_string(), "sheet");
        assert_eq!(ChromeState::UserPinned.to_string(), "pinned");
    }
}
