//! Chrome state resolution (pure).

use crate::model::{ChromeState, SignalSnapshot};

/// Compute the chrome state for a snapshot.
///
/// Conditions are tested highest priority first and the first match wins:
///
/// | condition | state |
/// |---|---|
/// | `has_selection` | `SelectionActive` |
/// | `is_sheet_presented` | `SheetPresented` |
/// | `is_search_active` | `SearchActive` |
/// | `is_menu_visible` | `MenuVisible` |
/// | `always_show_controls \|\| accessibility_forces_visible` | `UserPinned` |
/// | otherwise | `Reading` |
///
/// # Examples
///
/// ```
/// use lectern::model::{ChromeState, SignalSnapshot};
/// use lectern::state::resolve;
///
/// let snapshot = SignalSnapshot {
///     has_selection: true,
///     is_sheet_presented: true,
///     ..Default::default()
/// };
/// assert_eq!(resolve(&snapshot), ChromeState::SelectionActive);
/// ```
pub fn resolve(snapshot: &SignalSnapshot) -> ChromeState {
    if snapshot.has_selection {
        ChromeState::SelectionActive
    } else if snapshot.is_sheet_presented {
        ChromeState::SheetPresented
    } else if snapshot.is_search_active {
        ChromeState::SearchActive
    } else if snapshot.is_menu_visible {
        ChromeState::MenuVisible
    } else if snapshot.is_pinned() {
        ChromeState::UserPinned
    } else {
        ChromeState::Reading
    }
}
