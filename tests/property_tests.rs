//! Property-based tests for controller invariants.
//!
//! Tests validate:
//! 1. The resolved state always matches `resolve(snapshot)`
//! 2. Selection dominates every other signal
//! 3. Final state depends only on the set of signals raised, not their order
//! 4. At most one timer of each kind is armed; auto-hide only for an
//!    unpinned open menu, reveal-hold exactly while a reveal is shown
//! 5. A velocity reveal only exists in reading mode and a fast scroll clears it
//! 6. `hide_menu` is idempotent

use lectern::clock::ManualClock;
use lectern::config::ChromeTimings;
use lectern::model::{ChromeState, SignalSnapshot};
use lectern::preferences::StaticPreferences;
use lectern::state::{resolve, ChromeController, TimerKind};
use proptest::prelude::*;
use std::time::Duration;

/// One host interaction.
#[derive(Debug, Clone)]
enum Op {
    StartSelection,
    ClearSelection,
    OpenSheet,
    CloseSheet,
    ActivateSearch,
    DeactivateSearch,
    ShowMenu,
    HideMenu,
    ToggleMenu,
    Scroll { offset: f64, is_scrolling: bool },
    LegacyScroll,
    Advance(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::StartSelection),
        Just(Op::ClearSelection),
        Just(Op::OpenSheet),
        Just(Op::CloseSheet),
        Just(Op::ActivateSearch),
        Just(Op::DeactivateSearch),
        Just(Op::ShowMenu),
        Just(Op::HideMenu),
        Just(Op::ToggleMenu),
        (0.0f64..20_000.0, any::<bool>())
            .prop_map(|(offset, is_scrolling)| Op::Scroll { offset, is_scrolling }),
        Just(Op::LegacyScroll),
        (0u64..12_000).prop_map(Op::Advance),
    ]
}

fn controller(prefs: StaticPreferences) -> (ChromeController<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let chrome = ChromeController::new(ChromeTimings::default(), prefs, clock.clone());
    (chrome, clock)
}

fn apply(chrome: &mut ChromeController<ManualClock>, clock: &ManualClock, op: &Op) {
    match *op {
        Op::StartSelection => chrome.start_selection(),
        Op::ClearSelection => chrome.clear_selection(),
        Op::OpenSheet => chrome.open_sheet(),
        Op::CloseSheet => chrome.close_sheet(),
        Op::ActivateSearch => chrome.activate_search(),
        Op::DeactivateSearch => chrome.deactivate_search(),
        Op::ShowMenu => chrome.show_menu(),
        Op::HideMenu => chrome.hide_menu(),
        Op::ToggleMenu => chrome.toggle_menu(),
        Op::Scroll {
            offset,
            is_scrolling,
        } => chrome.on_scroll_update(offset, is_scrolling),
        Op::LegacyScroll => chrome.on_scroll(),
        Op::Advance(ms) => {
            clock.advance(Duration::from_millis(ms));
            chrome.tick();
        }
    }
}

fn raise(chrome: &mut ChromeController<ManualClock>, signal: u8) {
    match signal {
        0 => chrome.start_selection(),
        1 => chrome.open_sheet(),
        2 => chrome.activate_search(),
        _ => chrome.show_menu(),
    }
}

proptest! {
    #[test]
    fn state_always_matches_resolved_snapshot(
        ops in prop::collection::vec(op_strategy(), 0..60),
        pinned in any::<bool>(),
    ) {
        let prefs = StaticPreferences { always_show_controls: pinned, ..Default::default() };
        let (mut chrome, clock) = controller(prefs);

        for op in &ops {
            apply(&mut chrome, &clock, op);
            prop_assert_eq!(chrome.state(), resolve(&chrome.snapshot()));
            let per_kind: Vec<usize> = [
                TimerKind::AutoHide,
                TimerKind::PauseWait,
                TimerKind::RevealHold,
            ]
            .into_iter()
            .map(|kind| chrome.armed_timer_count(kind))
            .collect();
            prop_assert!(per_kind.iter().all(|&n| n <= 1), "per-kind timers {:?}", per_kind);
            prop_assert_eq!(per_kind.iter().sum::<usize>(), chrome.pending_timer_count());
            if per_kind[0] == 1 {
                prop_assert_eq!(chrome.state(), ChromeState::MenuVisible);
                prop_assert!(!chrome.is_auto_hide_disabled());
            }
            prop_assert_eq!(per_kind[2] == 1, chrome.should_reveal_from_velocity());
            if chrome.should_reveal_from_velocity() {
                prop_assert_eq!(chrome.state(), ChromeState::Reading);
            }
            if pinned {
                prop_assert!(chrome.is_auto_hide_disabled());
                prop_assert!(!chrome.should_reveal_from_velocity());
            }
        }
    }

    #[test]
    fn selection_dominates_every_other_signal(
        menu in any::<bool>(),
        search in any::<bool>(),
        sheet in any::<bool>(),
        pinned in any::<bool>(),
        forced in any::<bool>(),
    ) {
        let snapshot = SignalSnapshot {
            has_selection: true,
            is_menu_visible: menu,
            is_search_active: search,
            is_sheet_presented: sheet,
            always_show_controls: pinned,
            accessibility_forces_visible: forced,
        };
        prop_assert_eq!(resolve(&snapshot), ChromeState::SelectionActive);
    }

    #[test]
    fn final_state_is_independent_of_signal_order(
        signals in prop::collection::vec(0u8..4, 1..8),
    ) {
        let (mut in_order, _c1) = controller(StaticPreferences::default());
        for &signal in &signals {
            raise(&mut in_order, signal);
        }

        let mut reversed = signals.clone();
        reversed.reverse();
        let (mut backwards, _c2) = controller(StaticPreferences::default());
        for &signal in &reversed {
            raise(&mut backwards, signal);
        }

        prop_assert_eq!(in_order.state(), backwards.state());
        prop_assert_eq!(in_order.snapshot(), backwards.snapshot());
    }

    #[test]
    fn fast_scroll_always_clears_reveal(
        dt_ms in 20u64..1_000,
        excess in 1.05f64..10.0,
        downward in any::<bool>(),
    ) {
        let (mut chrome, clock) = controller(StaticPreferences::default());

        chrome.on_scroll_update(50_000.0, true);
        clock.advance(Duration::from_millis(100));
        chrome.on_scroll_update(49_990.0, true);
        clock.advance(ChromeTimings::default().pause_duration_for_reveal);
        chrome.tick();
        prop_assert!(chrome.should_reveal_from_velocity());

        clock.advance(Duration::from_millis(dt_ms));
        let distance = ChromeTimings::default().velocity_threshold_for_hide
            * excess
            * (dt_ms as f64 / 1_000.0);
        let offset = if downward { 49_990.0 + distance } else { 49_990.0 - distance };
        chrome.on_scroll_update(offset, true);

        prop_assert!(!chrome.should_reveal_from_velocity());
    }

    #[test]
    fn hide_menu_is_idempotent(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let (mut chrome, clock) = controller(StaticPreferences::default());
        for op in &ops {
            apply(&mut chrome, &clock, op);
        }

        chrome.hide_menu();
        let state = chrome.state();
        let snapshot = chrome.snapshot();
        let timers = chrome.pending_timer_count();

        chrome.hide_menu();
        prop_assert_eq!(chrome.state(), state);
        prop_assert_eq!(chrome.snapshot(), snapshot);
        prop_assert_eq!(chrome.pending_timer_count(), timers);
        prop_assert!(!chrome.snapshot().is_menu_visible);
    }
}
