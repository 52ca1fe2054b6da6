//! Decaying "recently used" flags.

use std::time::{Duration, Instant};

/// Flag that reads true for a fixed window after it is marked.
///
/// Decay is evaluated lazily against the clock, so no timer is needed to
/// clear it.
#[derive(Debug, Clone, Copy)]
pub struct RecentActivity {
    window: Duration,
    marked_at: Option<Instant>,
}

impl RecentActivity {
    /// Flag with the given decay window, initially unset.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            marked_at: None,
        }
    }

    /// Record activity at `now`, restarting the window.
    pub fn mark(&mut self, now: Instant) {
        self.marked_at = Some(now);
    }

    /// Whether activity happened less than one window before `now`.
    pub fn is_recent(&self, now: Instant) -> bool {
        self.marked_at
            .is_some_and(|at| now.saturating_duration_since(at) < self.window)
    }
}
