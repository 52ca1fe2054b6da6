//! Signal snapshot consumed by the resolver.

/// Snapshot of every input signal the chrome resolver depends on.
///
/// Each field is written independently by an external collaborator
/// (selection engine, sheet presenter, search bar, menu, preferences).
/// The controller owns the only mutable copy; collaborators never write
/// the resolved state directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignalSnapshot {
    /// A text selection is in progress.
    pub has_selection: bool,
    /// A modal sheet is on screen.
    pub is_sheet_presented: bool,
    /// The search input is focused.
    pub is_search_active: bool,
    /// The navigation menu is open.
    pub is_menu_visible: bool,
    /// User preference: never hide the controls.
    pub always_show_controls: bool,
    /// Reduce-motion or a screen reader is on, so chrome must stay visible.
    pub accessibility_forces_visible: bool,
}

impl SignalSnapshot {
    /// Whether chrome is pinned visible by preference or accessibility.
    pub fn is_pinned(&self) -> bool {
        self.always_show_controls || self.accessibility_forces_visible
    }
}

/// OS-level accessibility settings that affect chrome visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessibilityFlags {
    /// Reduce-motion is enabled.
    pub reduce_motion: bool,
    /// A screen reader is running.
    pub screen_reader: bool,
}

impl AccessibilityFlags {
    /// Chrome must remain visible when either flag is set.
    pub fn forces_visible(&self) -> bool {
        self.reduce_motion || self.screen_reader
    }
}
