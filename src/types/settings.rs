use serde::{Deserialize, Serialize};

/// Longest delay accepted for any timing setting: one minute.
pub const MAX_DELAY_MS: u64 = 60_000;

/// Top-level reader configuration, stored as `reader.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReaderConfig {
    pub reading: ReadingSettings,
    pub timing: TimingSettings,
    pub storage_keys: StorageKeys,
}

impl ReaderConfig {
    /// Checks value ranges that the JSON shape alone does not enforce.
    pub fn validate(&self) -> Result<(), String> {
        if self.reading.words_per_minute == 0 {
            return Err("reading.words_per_minute must be positive".to_string());
        }
        if !(self.reading.base_font_rem.is_finite() && self.reading.base_font_rem > 0.0) {
            return Err("reading.base_font_rem must be a positive number".to_string());
        }
        let timing = &self.timing;
        for (name, value) in [
            ("transition_ms", timing.transition_ms),
            ("hint_ms", timing.hint_ms),
            ("announcement_ms", timing.announcement_ms),
            ("scroll_throttle_ms", timing.scroll_throttle_ms),
        ] {
            if value > MAX_DELAY_MS {
                return Err(format!("timing.{} must be at most {} ms", name, MAX_DELAY_MS));
            }
        }
        Ok(())
    }
}

/// Reading-time and typography constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingSettings {
    pub words_per_minute: u32,
    /// Root font size the percentage steps scale, in rem.
    pub base_font_rem: f64,
}

impl Default for ReadingSettings {
    fn default() -> Self {
        Self {
            words_per_minute: 220,
            base_font_rem: 1.0,
        }
    }
}

/// Delays, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingSettings {
    pub transition_ms: u64,
    pub hint_ms: u64,
    pub announcement_ms: u64,
    pub scroll_throttle_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            transition_ms: 400,
            hint_ms: 4000,
            announcement_ms: 1000,
            scroll_throttle_ms: 100,
        }
    }
}

/// Keys used in the preference store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageKeys {
    pub enabled: String,
    pub hint_shown: String,
    pub font_size: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            enabled: "readerModeEnabled".to_string(),
            hint_shown: "readerModeHintShown".to_string(),
            font_size: "readerModeFontSize".to_string(),
        }
    }
}
