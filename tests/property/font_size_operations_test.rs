//! Property-based tests for font-size adjustment.
//!
//! For any sequence of increase/decrease/reset steps the size stays on one of
//! the defined steps, matches a clamped index model, and is persisted exactly
//! when it changes.

use std::sync::Arc;

use proptest::prelude::*;

use yaub_reader::database::preferences::{FallbackStore, MemoryPreferenceStore};
use yaub_reader::services::reader_mode::ReaderModeController;
use yaub_reader::services::scheduler::ManualClock;
use yaub_reader::types::reader::{FontSize, FontSizeDirection, FONT_SIZE_STEPS};
use yaub_reader::types::settings::ReaderConfig;
use yaub_reader::ui::headless::HeadlessPage;

const PAGE: &str = r#"<html><body>
    <a class="reader-mode-toggle"><i></i><span class="toggle-text">Reader Mode</span></a>
    <div id="body-inner"><p>text</p></div>
</body></html>"#;

fn arb_direction() -> impl Strategy<Value = FontSizeDirection> {
    prop_oneof![
        3 => Just(FontSizeDirection::Increase),
        3 => Just(FontSizeDirection::Decrease),
        1 => Just(FontSizeDirection::Reset),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn step_stays_within_defined_sizes(
        start in 0usize..FONT_SIZE_STEPS.len(),
        directions in prop::collection::vec(arb_direction(), 0..40),
    ) {
        let mut size = FontSize::from_percent(FONT_SIZE_STEPS[start]).unwrap();
        let mut index = start;
        for direction in directions {
            size = size.step(direction);
            index = match direction {
                FontSizeDirection::Increase => (index + 1).min(FONT_SIZE_STEPS.len() - 1),
                FontSizeDirection::Decrease => index.saturating_sub(1),
                FontSizeDirection::Reset => 2,
            };
            prop_assert_eq!(size.percent(), FONT_SIZE_STEPS[index]);
            prop_assert!(size.percent() >= 80 && size.percent() <= 150);
        }
    }

    #[test]
    fn controller_persists_only_changes(
        directions in prop::collection::vec(arb_direction(), 1..30),
    ) {
        let clock = ManualClock::new(0);
        let mut reader = ReaderModeController::initialize(
            HeadlessPage::from_html(PAGE),
            FallbackStore::new(MemoryPreferenceStore::new()),
            Arc::new(clock),
            ReaderConfig::default(),
        )
        .unwrap();

        let mut changes = 0usize;
        for direction in directions {
            let before = reader.font_size();
            let after = reader.adjust_font_size(direction);
            if after != before {
                changes += 1;
            }
            prop_assert_eq!(reader.font_size(), after);

            let controls = reader.page().font().unwrap();
            prop_assert_eq!(controls.percent, after.percent());
            prop_assert_eq!(controls.can_increase, after.percent() < 150);
            prop_assert_eq!(controls.can_decrease, after.percent() > 80);
        }

        let store = reader.store().backing().unwrap();
        prop_assert_eq!(store.write_count("readerModeFontSize"), changes);
        if changes > 0 {
            let stored = reader.store().get("readerModeFontSize").unwrap();
            prop_assert_eq!(FontSize::parse(&stored), Some(reader.font_size()));
        }
    }

    #[test]
    fn parse_accepts_only_defined_steps(percent in 0u16..400) {
        let parsed = FontSize::parse(&percent.to_string());
        prop_assert_eq!(parsed.is_some(), FONT_SIZE_STEPS.contains(&percent));
    }
}
