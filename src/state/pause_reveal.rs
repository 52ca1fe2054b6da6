//! Two-phase pause-then-reveal scheduling.
//!
//! Phase one waits for a quiet period after scrolling slows or stops. If the
//! controller accepts the reveal when that wait expires, phase two holds the
//! reveal for a fixed window and then conceals. The phases are separate
//! timers so each can be cancelled on its own.

use super::timer::{CancellableTimer, TimerHandle, TimerKind};
use crate::config::ChromeTimings;
use std::time::{Duration, Instant};

/// Owns the pause-wait and reveal-hold timers and the reveal flag.
#[derive(Debug)]
pub struct PauseRevealScheduler {
    pause_wait: CancellableTimer,
    reveal_hold: CancellableTimer,
    revealed: bool,
    pause_duration: Duration,
    reveal_duration: Duration,
}

impl PauseRevealScheduler {
    /// Scheduler using the pause and reveal durations from `timings`.
    pub fn new(timings: &ChromeTimings) -> Self {
        Self {
            pause_wait: CancellableTimer::new(TimerKind::PauseWait),
            reveal_hold: CancellableTimer::new(TimerKind::RevealHold),
            revealed: false,
            pause_duration: timings.pause_duration_for_reveal,
            reveal_duration: timings.velocity_reveal_duration,
        }
    }

    /// Start phase one, replacing any pending check.
    ///
    /// A reveal already on screen keeps its own hold timer.
    pub fn schedule_check(&mut self, now: Instant) -> TimerHandle {
        self.pause_wait.start(now, self.pause_duration)
    }

    /// Take the pending check if its quiet period has elapsed.
    pub fn take_check_due(&mut self, now: Instant) -> Option<TimerHandle> {
        self.pause_wait.take_due(now)
    }

    /// Start phase two: show the chrome and arm the conceal timer.
    pub fn begin_reveal(&mut self, now: Instant) -> TimerHandle {
        self.revealed = true;
        self.reveal_hold.start(now, self.reveal_duration)
    }

    /// Take the conceal timer if the reveal window has elapsed.
    pub fn take_conceal_due(&mut self, now: Instant) -> Option<TimerHandle> {
        self.reveal_hold.take_due(now)
    }

    /// Hide the revealed chrome.
    pub fn conceal(&mut self) {
        self.revealed = false;
    }

    /// Cancel both phases and hide the revealed chrome.
    pub fn cancel(&mut self) {
        self.pause_wait.cancel();
        self.reveal_hold.cancel();
        self.revealed = false;
    }

    /// Chrome is currently revealed.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// A check is pending, a reveal is on screen, or both.
    pub fn is_active(&self) -> bool {
        self.revealed || self.pause_wait.is_armed() || self.reveal_hold.is_armed()
    }

    /// Deadline of the pending check.
    pub fn check_deadline(&self) -> Option<Instant> {
        self.pause_wait.deadline()
    }

    /// Deadline of the conceal timer.
    pub fn conceal_deadline(&self) -> Option<Instant> {
        self.reveal_hold.deadline()
    }

    /// Number of armed timers (0, 1 or 2).
    pub fn armed_count(&self) -> usize {
        usize::from(self.pause_wait.is_armed()) + usize::from(self.reveal_hold.is_armed())
    }
}
