//! Auto-hide scheduling for the navigation menu.

use super::activity::RecentActivity;
use super::timer::{CancellableTimer, TimerHandle, TimerKind};
use crate::config::ChromeTimings;
use std::time::{Duration, Instant};

/// Owns the single auto-hide timer and the activity windows that stretch it.
///
/// The scheduler only decides *when*; whether hiding is still appropriate
/// when the timer fires is checked by the controller against the live state.
#[derive(Debug)]
pub struct AutoHideScheduler {
    timer: CancellableTimer,
    recently_closed_settings: RecentActivity,
    recently_searched: RecentActivity,
    default_delay: Duration,
    extended_delay: Duration,
    search_delay: Duration,
}

impl AutoHideScheduler {
    /// Scheduler using the delays and activity window from `timings`.
    pub fn new(timings: &ChromeTimings) -> Self {
        Self {
            timer: CancellableTimer::new(TimerKind::AutoHide),
            recently_closed_settings: RecentActivity::new(timings.recent_activity_window),
            recently_searched: RecentActivity::new(timings.recent_activity_window),
            default_delay: timings.default_delay,
            extended_delay: timings.extended_delay,
            search_delay: timings.search_delay,
        }
    }

    /// Delay that applies if the timer were started at `now`.
    ///
    /// A recently closed settings sheet wins over a recent search.
    pub fn delay(&self, now: Instant) -> Duration {
        if self.recently_closed_settings.is_recent(now) {
            self.extended_delay
        } else if self.recently_searched.is_recent(now) {
            self.search_delay
        } else {
            self.default_delay
        }
    }

    /// Cancel any pending hide and schedule a new one.
    pub fn start(&mut self, now: Instant) -> TimerHandle {
        let delay = self.delay(now);
        self.timer.start(now, delay)
    }

    /// Cancel the pending hide. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.timer.cancel()
    }

    /// Record that a settings sheet was dismissed.
    pub fn note_settings_closed(&mut self, now: Instant) {
        self.recently_closed_settings.mark(now);
    }

    /// Record that search was activated.
    pub fn note_search_activated(&mut self, now: Instant) {
        self.recently_searched.mark(now);
    }

    /// Whether a hide is pending.
    pub fn is_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// When the pending hide is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Take the pending hide if it is due.
    pub fn take_due(&mut self, now: Instant) -> Option<TimerHandle> {
        self.timer.take_due(now)
    }
}
