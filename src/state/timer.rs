//! Owned, cancellable, deadline-based timers.
//!
//! Timers never run on their own. The host's event loop asks each slot
//! whether its deadline has passed (`take_due`) and applies the effect on
//! the same execution context as every other mutation, so no locking is
//! needed and a cancel issued earlier in program order always wins.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::trace;

/// The kinds of timer the chrome controller owns, one slot each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Hides the menu after inactivity.
    AutoHide,
    /// Quiet period before a pause-reveal.
    PauseWait,
    /// Duration of a velocity reveal.
    RevealHold,
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimerKind::AutoHide => "auto-hide",
            TimerKind::PauseWait => "pause-wait",
            TimerKind::RevealHold => "reveal-hold",
        })
    }
}

/// A scheduled unit of deferred work.
///
/// Clones share one cancellation flag with the slot that issued the handle,
/// so cancelling any copy stops the timer from firing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerHandle {
    id: u64,
    deadline: Instant,
    cancelled: Rc<Cell<bool>>,
}

impl TimerHandle {
    /// Monotonically increasing per slot.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Instant at which the work becomes due.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Mark the timer so it never fires.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Whether the timer was cancelled through any handle or its slot.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Due and not cancelled.
    pub fn is_due(&self, now: Instant) -> bool {
        !self.is_cancelled() && now >= self.deadline
    }
}

/// Slot holding at most one live [`TimerHandle`].
///
/// Starting a new timer always cancels the previous one first, so two
/// timers of the same kind can never be outstanding. The cancellation flag
/// is checked before a timer is handed out as due.
#[derive(Debug)]
pub struct CancellableTimer {
    kind: TimerKind,
    current: Option<TimerHandle>,
    next_id: u64,
}

impl CancellableTimer {
    /// Empty slot for the given kind.
    pub fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            current: None,
            next_id: 0,
        }
    }

    /// Cancel any live timer, then arm a new one due at `now + delay`.
    pub fn start(&mut self, now: Instant, delay: Duration) -> TimerHandle {
        self.cancel();

        self.next_id += 1;
        let handle = TimerHandle {
            id: self.next_id,
            deadline: now + delay,
            cancelled: Rc::new(Cell::new(false)),
        };
        self.current = Some(handle.clone());

        trace!(timer = %self.kind, id = handle.id, ?delay, "timer armed");
        handle
    }

    /// Cancel the live timer, if any. Returns whether one was still live.
    pub fn cancel(&mut self) -> bool {
        match self.current.take() {
            Some(handle) if !handle.is_cancelled() => {
                handle.cancel();
                trace!(timer = %self.kind, id = handle.id, "timer cancelled");
                true
            }
            _ => false,
        }
    }

    /// Whether a live timer is waiting.
    pub fn is_armed(&self) -> bool {
        self.live().is_some()
    }

    /// Deadline of the live timer.
    pub fn deadline(&self) -> Option<Instant> {
        self.live().map(TimerHandle::deadline)
    }

    /// Disarm and return the live timer if its deadline has passed.
    ///
    /// A not-yet-due timer yields `None` and stays armed. A timer cancelled
    /// through one of its handles yields `None` and is dropped from the slot.
    pub fn take_due(&mut self, now: Instant) -> Option<TimerHandle> {
        let handle = self.current.as_ref()?;
        if handle.is_cancelled() {
            trace!(timer = %self.kind, id = handle.id, "cancelled timer discarded");
            self.current = None;
            return None;
        }
        if !handle.is_due(now) {
            return None;
        }

        let handle = self.current.take()?;
        trace!(timer = %self.kind, id = handle.id, "timer fired");
        Some(handle)
    }

    fn live(&self) -> Option<&TimerHandle> {
        self.current.as_ref().filter(|h| !h.is_cancelled())
    }
}
