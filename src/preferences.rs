//! Injected user-preference and accessibility queries.
//!
//! The controller polls these rather than reading ambient global storage,
//! so it can be exercised in isolation.

use crate::model::AccessibilityFlags;
use std::sync::{Arc, Mutex};

/// Query interface for settings that pin the chrome visible.
pub trait PreferenceSource {
    /// User preference: always show the reader controls.
    fn always_show_controls(&self) -> bool;

    /// Current OS accessibility settings.
    fn accessibility(&self) -> AccessibilityFlags;
}

/// Fixed preference values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaticPreferences {
    /// Always show the reader controls.
    pub always_show_controls: bool,
    /// Accessibility settings.
    pub accessibility: AccessibilityFlags,
}

impl PreferenceSource for StaticPreferences {
    fn always_show_controls(&self) -> bool {
        self.always_show_controls
    }

    fn accessibility(&self) -> AccessibilityFlags {
        self.accessibility
    }
}

/// Preferences that can change while the controller runs.
///
/// Clones share storage: the settings screen writes through one handle and
/// the controller observes the change on its next poll.
#[derive(Debug, Clone, Default)]
pub struct SharedPreferences {
    inner: Arc<Mutex<StaticPreferences>>,
}

impl SharedPreferences {
    /// Wrap initial values.
    pub fn new(initial: StaticPreferences) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    /// Update the "always show controls" preference.
    pub fn set_always_show_controls(&self, value: bool) {
        self.lock().always_show_controls = value;
    }

    /// Update the accessibility settings.
    pub fn set_accessibility(&self, flags: AccessibilityFlags) {
        self.lock().accessibility = flags;
    }

    /// Copy of the current values.
    pub fn get(&self) -> StaticPreferences {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StaticPreferences> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PreferenceSource for SharedPreferences {
    fn always_show_controls(&self) -> bool {
        self.get().always_show_controls
    }

    fn accessibility(&self) -> AccessibilityFlags {
        self.get().accessibility
    }
}
