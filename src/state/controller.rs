//! Reader-chrome visibility controller.
//!
//! Explicit event + pure-function model: every collaborator call mutates one
//! field of the [`SignalSnapshot`], then the dispatcher re-resolves the
//! state, diffs it against the previous one and issues scheduler commands.
//! Timer expirations are applied by [`ChromeController::fire_due_timers`]
//! on the same execution context, so no locking is involved anywhere.

use super::auto_hide::AutoHideScheduler;
use super::pause_reveal::PauseRevealScheduler;
use super::resolver::resolve;
use super::timer::TimerKind;
use super::velocity::{VelocityReading, VelocityTracker};
use crate::clock::{Clock, SystemClock};
use crate::config::ChromeTimings;
use crate::model::{ChromeState, SignalSnapshot, VisibilityOutputs};
use crate::preferences::PreferenceSource;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Decides when the floating reader chrome is shown, hidden or revealed.
///
/// Single owner, single-threaded. The host pushes signals in, calls
/// [`tick`](Self::tick) from its event loop, and reads the derived outputs.
///
/// # Examples
///
/// ```
/// use lectern::clock::ManualClock;
/// use lectern::config::ChromeTimings;
/// use lectern::model::ChromeState;
/// use lectern::preferences::StaticPreferences;
/// use lectern::state::ChromeController;
///
/// let clock = ManualClock::new();
/// let timings = ChromeTimings::default();
/// let mut chrome = ChromeController::new(timings, StaticPreferences::default(), clock.clone());
///
/// chrome.show_menu();
/// assert_eq!(chrome.state(), ChromeState::MenuVisible);
///
/// clock.advance(timings.default_delay);
/// chrome.tick();
/// assert_eq!(chrome.state(), ChromeState::Reading);
/// ```
pub struct ChromeController<C: Clock = SystemClock> {
    timings: ChromeTimings,
    clock: C,
    preferences: Box<dyn PreferenceSource>,
    snapshot: SignalSnapshot,
    state: ChromeState,
    velocity: VelocityTracker,
    auto_hide: AutoHideScheduler,
    pause_reveal: PauseRevealScheduler,
}

impl<C: Clock> ChromeController<C> {
    /// Create a controller, reading the preference source once.
    pub fn new(
        timings: ChromeTimings,
        preferences: impl PreferenceSource + 'static,
        clock: C,
    ) -> Self {
        let snapshot = SignalSnapshot {
            always_show_controls: preferences.always_show_controls(),
            accessibility_forces_visible: preferences.accessibility().forces_visible(),
            ..Default::default()
        };
        let state = resolve(&snapshot);

        debug!(%state, ?timings, "chrome controller created");

        Self {
            timings,
            clock,
            preferences: Box::new(preferences),
            snapshot,
            state,
            velocity: VelocityTracker::new(timings.minimum_sample_interval),
            auto_hide: AutoHideScheduler::new(&timings),
            pause_reveal: PauseRevealScheduler::new(&timings),
        }
    }

    // ===== Selection lifecycle =====

    /// A text selection began.
    pub fn start_selection(&mut self) {
        self.update_signals("selection started", |s| s.has_selection = true);
    }

    /// The text selection was cleared.
    pub fn clear_selection(&mut self) {
        self.update_signals("selection cleared", |s| s.has_selection = false);
    }

    // ===== Sheet lifecycle =====

    /// A modal sheet was presented.
    pub fn open_sheet(&mut self) {
        self.update_signals("sheet opened", |s| s.is_sheet_presented = true);
    }

    /// The modal sheet was dismissed.
    ///
    /// Arms the "recently closed settings" window, which lengthens the next
    /// auto-hide delay.
    pub fn close_sheet(&mut self) {
        if self.snapshot.is_sheet_presented {
            let now = self.clock.now();
            self.auto_hide.note_settings_closed(now);
        }
        self.update_signals("sheet closed", |s| s.is_sheet_presented = false);
    }

    // ===== Search lifecycle =====

    /// The search input gained focus.
    ///
    /// Arms the "recently searched" window.
    pub fn activate_search(&mut self) {
        if !self.snapshot.is_search_active {
            let now = self.clock.now();
            self.auto_hide.note_search_activated(now);
        }
        self.update_signals("search activated", |s| s.is_search_active = true);
    }

    /// The search input lost focus.
    pub fn deactivate_search(&mut self) {
        self.update_signals("search deactivated", |s| s.is_search_active = false);
    }

    // ===== Menu lifecycle =====

    /// The navigation menu was opened.
    pub fn show_menu(&mut self) {
        self.update_signals("menu shown", |s| s.is_menu_visible = true);
    }

    /// The navigation menu was closed.
    pub fn hide_menu(&mut self) {
        self.update_signals("menu hidden", |s| s.is_menu_visible = false);
    }

    /// Open the menu if closed, close it if open.
    pub fn toggle_menu(&mut self) {
        if self.snapshot.is_menu_visible {
            self.hide_menu();
        } else {
            self.show_menu();
        }
    }

    // ===== Scroll =====

    /// Feed a scroll offset (px) observed now.
    ///
    /// `is_scrolling` is false for the sample that ends a scroll gesture.
    /// Samples that arrive within the minimum sample interval of the last
    /// accepted one are ignored entirely.
    pub fn on_scroll_update(&mut self, offset: f64, is_scrolling: bool) {
        let now = self.clock.now();
        let Some(reading) = self.velocity.record(offset, now) else {
            return;
        };

        if is_scrolling {
            self.apply_active_scroll(reading);
        } else {
            trace!(velocity = reading.velocity, "scroll ended");
            self.start_pause_reveal_check();
        }
    }

    /// Legacy scroll notification without an offset: hide an open menu.
    pub fn on_scroll(&mut self) {
        if self.state == ChromeState::MenuVisible {
            self.hide_menu();
        }
    }

    fn apply_active_scroll(&mut self, reading: VelocityReading) {
        if reading.velocity > self.timings.velocity_threshold_for_hide {
            trace!(velocity = reading.velocity, "fast scroll");
            self.cancel_velocity_reveal();
            if self.state == ChromeState::MenuVisible {
                self.update_signals("fast scroll", |s| s.is_menu_visible = false);
            }
        } else if reading.velocity < self.timings.velocity_threshold_for_reveal
            && reading.is_scrolling_up
        {
            self.start_pause_reveal_check();
        }
    }

    // ===== Pause-reveal =====

    /// Arm the quiet-period check, replacing any pending one.
    pub fn start_pause_reveal_check(&mut self) {
        let now = self.clock.now();
        self.pause_reveal.schedule_check(now);
    }

    /// Cancel both reveal phases and conceal immediately.
    pub fn cancel_velocity_reveal(&mut self) {
        if self.pause_reveal.is_revealed() {
            debug!("velocity reveal cancelled");
        }
        self.pause_reveal.cancel();
    }

    // ===== Auto-hide =====

    /// Cancel any pending hide and schedule a new one after
    /// [`auto_hide_delay`](Self::auto_hide_delay).
    pub fn start_auto_hide_timer(&mut self) {
        let now = self.clock.now();
        let handle = self.auto_hide.start(now);
        debug!(
            delay = ?handle.deadline().saturating_duration_since(now),
            "auto-hide scheduled"
        );
    }

    /// Cancel the pending hide, if any.
    pub fn cancel_auto_hide_timer(&mut self) {
        if self.auto_hide.cancel() {
            debug!("auto-hide cancelled");
        }
    }

    /// Delay the auto-hide timer would use if started now.
    pub fn auto_hide_delay(&self) -> Duration {
        self.auto_hide.delay(self.clock.now())
    }

    /// Auto-hide is suppressed while chrome is pinned.
    pub fn is_auto_hide_disabled(&self) -> bool {
        self.snapshot.is_pinned()
    }

    // ===== Preferences =====

    /// Re-read the preference source and apply any change.
    pub fn refresh_preferences(&mut self) {
        let always_show = self.preferences.always_show_controls();
        let forces_visible = self.preferences.accessibility().forces_visible();
        self.update_signals("preferences changed", |s| {
            s.always_show_controls = always_show;
            s.accessibility_forces_visible = forces_visible;
        });
    }

    // ===== Timer driving =====

    /// Poll preferences, then apply every timer that has come due.
    pub fn tick(&mut self) -> usize {
        self.refresh_preferences();
        self.fire_due_timers()
    }

    /// Apply due timers in deadline order. Returns how many fired.
    ///
    /// Each timer re-checks its guard against the state at the moment it
    /// fires, so a timer made stale by an earlier one is a silent no-op.
    pub fn fire_due_timers(&mut self) -> usize {
        let mut fired = 0;
        loop {
            let now = self.clock.now();
            let Some(kind) = self.earliest_due(now) else {
                break;
            };

            match kind {
                TimerKind::AutoHide => {
                    if self.auto_hide.take_due(now).is_some() {
                        self.on_auto_hide_elapsed();
                    }
                }
                TimerKind::PauseWait => {
                    if let Some(check) = self.pause_reveal.take_check_due(now) {
                        self.on_pause_elapsed(check.deadline());
                    }
                }
                TimerKind::RevealHold => {
                    if self.pause_reveal.take_conceal_due(now).is_some() {
                        self.pause_reveal.conceal();
                        debug!("velocity reveal concealed");
                    }
                }
            }
            fired += 1;
        }
        fired
    }

    /// Earliest instant at which a timer will need firing.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines()
            .into_iter()
            .filter_map(|(deadline, _)| deadline)
            .min()
    }

    fn deadlines(&self) -> [(Option<Instant>, TimerKind); 3] {
        [
            (self.auto_hide.deadline(), TimerKind::AutoHide),
            (self.pause_reveal.check_deadline(), TimerKind::PauseWait),
            (self.pause_reveal.conceal_deadline(), TimerKind::RevealHold),
        ]
    }

    fn earliest_due(&self, now: Instant) -> Option<TimerKind> {
        self.deadlines()
            .into_iter()
            .filter_map(|(deadline, kind)| deadline.filter(|d| *d <= now).map(|d| (d, kind)))
            .min_by_key(|(deadline, _)| *deadline)
            .map(|(_, kind)| kind)
    }

    fn on_auto_hide_elapsed(&mut self) {
        if self.state == ChromeState::MenuVisible && !self.is_auto_hide_disabled() {
            self.update_signals("auto-hide elapsed", |s| s.is_menu_visible = false);
        } else {
            trace!(state = %self.state, "stale auto-hide ignored");
        }
    }

    /// The reveal window is anchored at the check's deadline, not at the
    /// tick that noticed it, so a late tick does not stretch the reveal.
    fn on_pause_elapsed(&mut self, due: Instant) {
        let velocity = self.velocity.current_velocity();
        if self.state == ChromeState::Reading
            && velocity < self.timings.velocity_threshold_for_reveal
        {
            self.pause_reveal.begin_reveal(due);
            debug!(velocity, "velocity reveal shown");
        } else {
            trace!(state = %self.state, velocity, "pause reveal skipped");
        }
    }

    // ===== Dispatcher =====

    fn update_signals(&mut self, cause: &'static str, mutate: impl FnOnce(&mut SignalSnapshot)) {
        let before = self.snapshot;
        mutate(&mut self.snapshot);
        if self.snapshot == before {
            trace!(cause, "signal unchanged");
            return;
        }
        self.reconcile(cause);
    }

    fn reconcile(&mut self, cause: &'static str) {
        let previous = self.state;
        let next = resolve(&self.snapshot);
        self.state = next;

        if previous != next {
            debug!(from = %previous, to = %next, cause, "chrome state changed");
        }

        if next == ChromeState::MenuVisible && !self.is_auto_hide_disabled() {
            // Restart only on entry; an unpinned menu with no timer gets one too
            if previous != next || !self.auto_hide.is_armed() {
                self.start_auto_hide_timer();
            }
        } else {
            self.cancel_auto_hide_timer();
        }

        if next != ChromeState::Reading && self.pause_reveal.is_active() {
            self.cancel_velocity_reveal();
        }
    }

    // ===== Teardown =====

    /// Cancel every outstanding timer and conceal any reveal.
    pub fn teardown(&mut self) {
        self.cancel_auto_hide_timer();
        self.cancel_velocity_reveal();
    }

    // ===== Outputs =====

    /// Resolved chrome state.
    pub fn state(&self) -> ChromeState {
        self.state
    }

    /// Current signal snapshot.
    pub fn snapshot(&self) -> SignalSnapshot {
        self.snapshot
    }

    /// All derived visibility outputs.
    pub fn outputs(&self) -> VisibilityOutputs {
        VisibilityOutputs::derive(self.state, self.pause_reveal.is_revealed())
    }

    /// Floating menu button is visible.
    pub fn show_menu_button(&self) -> bool {
        self.outputs().show_menu_button
    }

    /// Selection toolbar is visible.
    pub fn show_selection_toolbar(&self) -> bool {
        self.outputs().show_selection_toolbar
    }

    /// Plain reading mode.
    pub fn is_reading_mode(&self) -> bool {
        self.outputs().is_reading_mode
    }

    /// Chrome is transiently revealed by a scroll pause.
    pub fn should_reveal_from_velocity(&self) -> bool {
        self.pause_reveal.is_revealed()
    }

    /// Opacity for revealed chrome.
    pub fn velocity_reveal_opacity(&self) -> f32 {
        self.outputs().velocity_reveal_opacity
    }

    /// Most recent scroll velocity in px/s.
    pub fn current_velocity(&self) -> f64 {
        self.velocity.current_velocity()
    }

    /// Direction of the most recent accepted scroll movement.
    pub fn is_scrolling_up(&self) -> bool {
        self.velocity.is_scrolling_up()
    }

    /// Timings in effect.
    pub fn timings(&self) -> &ChromeTimings {
        &self.timings
    }

    /// Number of armed timers across all schedulers (at most 3).
    pub fn pending_timer_count(&self) -> usize {
        usize::from(self.auto_hide.is_armed()) + self.pause_reveal.armed_count()
    }

    /// Number of armed timers of one kind.
    pub fn armed_timer_count(&self, kind: TimerKind) -> usize {
        self.deadlines()
            .iter()
            .filter(|(deadline, k)| *k == kind && deadline.is_some())
            .count()
    }
}

impl<C: Clock> Drop for ChromeController<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
