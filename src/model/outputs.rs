//! Derived visibility outputs read by the rendering layer.

use super::ChromeState;

/// Opacity applied to chrome that is shown only because of a velocity reveal.
pub const VELOCITY_REVEAL_OPACITY: f32 = 0.9;

/// Opacity of chrome in every other case.
pub const FULL_OPACITY: f32 = 1.0;

/// Everything a renderer needs to lay out the chrome, read in one go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityOutputs {
    /// Resolved chrome state.
    pub state: ChromeState,
    /// Floating menu button is visible.
    pub show_menu_button: bool,
    /// Selection toolbar (highlight/note/copy) is visible.
    pub show_selection_toolbar: bool,
    /// Distraction-free reading mode.
    pub is_reading_mode: bool,
    /// Chrome is transiently revealed by a scroll pause.
    pub should_reveal_from_velocity: bool,
    /// Opacity of revealed chrome.
    pub velocity_reveal_opacity: f32,
}

impl VisibilityOutputs {
    /// Derive outputs from the resolved state and the reveal flag.
    pub fn derive(state: ChromeState, should_reveal_from_velocity: bool) -> Self {
        Self {
            state,
            show_menu_button: matches!(state, ChromeState::Reading | ChromeState::UserPinned)
                || should_reveal_from_velocity,
            show_selection_toolbar: state == ChromeState::SelectionActive,
            is_reading_mode: state == ChromeState::Reading,
            should_reveal_from_velocity,
            velocity_reveal_opacity: if should_reveal_from_velocity {
                VELOCITY_REVEAL_OPACITY
            } else {
                FULL_OPACITY
            },
        }
    }

    /// Whether any top-bar chrome should be drawn.
    ///
    /// Hidden only in plain reading mode without an active reveal.
    pub fn show_top_bar(&self) -> bool {
        !self.is_reading_mode || self.should_reveal_from_velocity
    }
}
