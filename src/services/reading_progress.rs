//! Reading progress for the article on screen.
//!
//! Word count and total reading time are fixed when the tracker is built; the
//! percentage is recomputed from scroll position, at most once per throttle window.

use crate::types::page::{ArticleBounds, ScrollMetrics};
use crate::types::reader::ReadingProgress;

/// Leading-edge throttle: the first call in a window fires, the rest are dropped.
///
/// A dropped call is never replayed when the window closes.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: u64,
    last_fired_ms: Option<u64>,
}

impl Throttle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_fired_ms: None,
        }
    }

    /// Returns true if a call at `now_ms` may run, and starts a new window if so.
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        match self.last_fired_ms {
            Some(last) if now_ms.saturating_sub(last) < self.interval_ms => false,
            _ => {
                self.last_fired_ms = Some(now_ms);
                true
            }
        }
    }
}

/// Counts whitespace-separated words in extracted article text.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes to read `word_count` words, rounded up. Zero words read in zero minutes.
pub fn estimate_minutes(word_count: usize, words_per_minute: u32) -> u32 {
    if words_per_minute == 0 {
        return 0;
    }
    ((word_count as f64) / f64::from(words_per_minute)).ceil() as u32
}

/// Share of the article scrolled past, clamped to `[0, 100]`.
///
/// 0% while the article top is at or below the viewport top, 100% once the
/// article bottom reaches the viewport bottom. An article shorter than the
/// viewport jumps straight from 0 to 100 as its top scrolls past.
pub fn percent_complete(bounds: ArticleBounds, scroll: ScrollMetrics) -> f64 {
    let start = bounds.top;
    let end = bounds.top + bounds.height - scroll.viewport_height;
    if end <= start {
        return if scroll.scroll_y >= start { 100.0 } else { 0.0 };
    }
    let percent = (scroll.scroll_y - start) / (end - start) * 100.0;
    percent.clamp(0.0, 100.0)
}

/// `ceil(remaining share * total minutes)`.
pub fn remaining_minutes(percent_complete: f64, total_minutes: u32) -> u32 {
    let remaining = (100.0 - percent_complete.clamp(0.0, 100.0)) / 100.0;
    (remaining * f64::from(total_minutes)).ceil() as u32
}

/// Tracks progress through one article.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    word_count: usize,
    total_minutes: u32,
    throttle: Throttle,
    current: ReadingProgress,
}

impl ProgressTracker {
    pub fn new(word_count: usize, words_per_minute: u32, throttle_ms: u64) -> Self {
        let total_minutes = estimate_minutes(word_count, words_per_minute);
        Self {
            word_count,
            total_minutes,
            throttle: Throttle::new(throttle_ms),
            current: ReadingProgress::start(total_minutes),
        }
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn total_minutes(&self) -> u32 {
        self.total_minutes
    }

    pub fn current(&self) -> ReadingProgress {
        self.current
    }

    /// Recomputes progress unconditionally.
    pub fn recompute(&mut self, bounds: ArticleBounds, scroll: ScrollMetrics) -> ReadingProgress {
        let percent = percent_complete(bounds, scroll);
        self.current = ReadingProgress {
            percent_complete: percent,
            remaining_minutes: remaining_minutes(percent, self.total_minutes),
        };
        self.current
    }

    /// Recomputes progress unless a previous scroll fired less than one window ago.
    pub fn on_scroll(
        &mut self,
        now_ms: u64,
        bounds: ArticleBounds,
        scroll: ScrollMetrics,
    ) -> Option<ReadingProgress> {
        if !self.throttle.try_fire(now_ms) {
            return None;
        }
        Some(self.recompute(bounds, scroll))
    }
}
