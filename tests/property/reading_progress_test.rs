//! Property-based tests for reading-progress math.
//!
//! Percent complete stays within `[0, 100]` and never decreases while
//! scrolling down; remaining minutes never exceed the total and reach zero at
//! the end of the article.

use proptest::prelude::*;

use yaub_reader::services::reading_progress::{
    estimate_minutes, percent_complete, remaining_minutes, Throttle,
};
use yaub_reader::types::page::{ArticleBounds, ScrollMetrics};

fn metrics(scroll_y: f64, viewport_height: f64) -> ScrollMetrics {
    ScrollMetrics { scroll_y, viewport_height }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn percent_is_clamped(
        top in 0.0f64..5000.0,
        height in 0.0f64..20000.0,
        viewport in 100.0f64..2000.0,
        scroll in -1000.0f64..30000.0,
    ) {
        let pct = percent_complete(ArticleBounds { top, height }, metrics(scroll, viewport));
        prop_assert!((0.0..=100.0).contains(&pct));
    }

    #[test]
    fn percent_is_monotonic_in_scroll(
        top in 0.0f64..5000.0,
        height in 0.0f64..20000.0,
        viewport in 100.0f64..2000.0,
        a in 0.0f64..30000.0,
        b in 0.0f64..30000.0,
    ) {
        let bounds = ArticleBounds { top, height };
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = percent_complete(bounds, metrics(lo, viewport));
        let p_hi = percent_complete(bounds, metrics(hi, viewport));
        prop_assert!(p_lo <= p_hi);
    }

    #[test]
    fn remaining_is_bounded_by_total(pct in 0.0f64..=100.0, total in 0u32..500) {
        let remaining = remaining_minutes(pct, total);
        prop_assert!(remaining <= total);
        prop_assert_eq!(remaining_minutes(100.0, total), 0);
        prop_assert_eq!(remaining_minutes(0.0, total), total);
    }

    #[test]
    fn estimate_rounds_up(words in 0usize..100_000, wpm in 1u32..1000) {
        let minutes = estimate_minutes(words, wpm);
        prop_assert!(u64::from(minutes) * u64::from(wpm) >= words as u64);
        if words > 0 {
            prop_assert!(u64::from(minutes - 1) * u64::from(wpm) < words as u64);
        } else {
            prop_assert_eq!(minutes, 0);
        }
    }

    // At most one call fires within any window of `interval` milliseconds.
    #[test]
    fn throttle_fires_at_most_once_per_window(
        interval in 1u64..500,
        mut gaps in prop::collection::vec(0u64..300, 1..60),
    ) {
        let mut throttle = Throttle::new(interval);
        let mut now = 0u64;
        let mut fired: Vec<u64> = Vec::new();
        gaps.insert(0, 0);
        for gap in gaps {
            now += gap;
            if throttle.try_fire(now) {
                fired.push(now);
            }
        }
        prop_assert_eq!(fired.first().copied(), Some(0));
        for pair in fired.windows(2) {
            prop_assert!(pair[1] - pair[0] >= interval);
        }
    }
}
