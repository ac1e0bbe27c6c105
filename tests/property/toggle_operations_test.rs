//! Property-based tests for reader-mode toggling.
//!
//! These tests verify that, for any sequence of toggle/enable/disable calls,
//! the visible state (body class, toggle button, stored flag) always agrees
//! with `is_enabled()`, and that the stored flag is only written on change.

use std::sync::Arc;

use proptest::prelude::*;

use yaub_reader::database::preferences::{FallbackStore, MemoryPreferenceStore};
use yaub_reader::services::reader_mode::{ReaderModeApi, ReaderModeController};
use yaub_reader::services::scheduler::ManualClock;
use yaub_reader::types::settings::ReaderConfig;
use yaub_reader::ui::headless::HeadlessPage;
use yaub_reader::ui::page_host::{PageHost, READER_MODE_CLASS};

const PAGE: &str = r#"<html><body>
    <a class="reader-mode-toggle"><i></i><span class="toggle-text">Reader Mode</span></a>
    <div id="body-inner"><p>some words to read</p></div>
</body></html>"#;

#[derive(Debug, Clone, Copy)]
enum ToggleOp {
    Toggle,
    Enable,
    Disable,
    Tick(u64),
}

fn arb_toggle_ops() -> impl Strategy<Value = Vec<ToggleOp>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(ToggleOp::Toggle),
            1 => Just(ToggleOp::Enable),
            1 => Just(ToggleOp::Disable),
            1 => (0..5000u64).prop_map(ToggleOp::Tick),
        ],
        1..40,
    )
}

fn controller(
    clock: &ManualClock,
) -> ReaderModeController<HeadlessPage, MemoryPreferenceStore> {
    ReaderModeController::initialize(
        HeadlessPage::from_html(PAGE),
        FallbackStore::new(MemoryPreferenceStore::new()),
        Arc::new(clock.clone()),
        ReaderConfig::default(),
    )
    .unwrap()
}

// Toggle parity: after N toggles from the initial state, reader mode is on
// exactly when N is odd.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn toggle_parity(n in 0usize..30) {
        let clock = ManualClock::new(0);
        let mut reader = controller(&clock);
        for _ in 0..n {
            reader.toggle();
        }
        prop_assert_eq!(reader.is_enabled(), n % 2 == 1);
    }
}

// State agreement: after any operation sequence, the body class, the toggle
// button and the persisted flag all match `is_enabled()`, and the flag was
// written once per actual state change.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn visible_state_tracks_enabled(ops in arb_toggle_ops()) {
        let clock = ManualClock::new(0);
        let mut reader = controller(&clock);
        let mut expected = false;
        let mut changes = 0usize;

        for op in &ops {
            match op {
                ToggleOp::Toggle => {
                    reader.toggle();
                    expected = !expected;
                    changes += 1;
                }
                ToggleOp::Enable => {
                    reader.enable();
                    if !expected {
                        changes += 1;
                    }
                    expected = true;
                }
                ToggleOp::Disable => {
                    reader.disable();
                    if expected {
                        changes += 1;
                    }
                    expected = false;
                }
                ToggleOp::Tick(ms) => {
                    clock.advance(*ms);
                    reader.run_due_tasks();
                }
            }

            prop_assert_eq!(reader.is_enabled(), expected);
            prop_assert_eq!(reader.page().has_body_class(READER_MODE_CLASS), expected);
            prop_assert_eq!(reader.page().toggle().map(|t| t.pressed), Some(expected));
        }

        let store = reader.store().backing().unwrap();
        prop_assert_eq!(store.write_count("readerModeEnabled"), changes);
        if changes > 0 {
            let stored = reader.store().get("readerModeEnabled");
            prop_assert_eq!(stored.as_deref(), Some(if expected { "true" } else { "false" }));
        }
    }
}

// The hint is shown at most once per store, however often reader mode is entered.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn hint_marked_seen_once(n in 1usize..20) {
        let clock = ManualClock::new(0);
        let mut reader = controller(&clock);
        for _ in 0..n {
            reader.toggle();
            clock.advance(100);
            reader.run_due_tasks();
        }
        let store = reader.store().backing().unwrap();
        prop_assert_eq!(store.write_count("readerModeHintShown"), 1);
        prop_assert!(reader.state().hint_shown);
    }
}
