use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered font-size steps, in percent of the base size.
pub const FONT_SIZE_STEPS: [u16; 8] = [80, 90, 100, 110, 120, 130, 140, 150];

const DEFAULT_STEP_INDEX: usize = 2;

/// A font size that is always one of [`FONT_SIZE_STEPS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct FontSize {
    index: usize,
}

impl FontSize {
    pub const MIN: FontSize = FontSize { index: 0 };
    pub const DEFAULT: FontSize = FontSize { index: DEFAULT_STEP_INDEX };
    pub const MAX: FontSize = FontSize { index: FONT_SIZE_STEPS.len() - 1 };

    /// Returns the step matching `percent`, if it is one of the defined steps.
    pub fn from_percent(percent: u16) -> Option<Self> {
        FONT_SIZE_STEPS
            .iter()
            .position(|&step| step == percent)
            .map(|index| Self { index })
    }

    /// Parses a persisted value such as `"110"`.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u16>().ok().and_then(Self::from_percent)
    }

    pub fn percent(self) -> u16 {
        FONT_SIZE_STEPS[self.index]
    }

    /// Applied size in rem for the given base size.
    pub fn rem(self, base_rem: f64) -> f64 {
        f64::from(self.percent()) / 100.0 * base_rem
    }

    /// The next step in `direction`, clamped to the ends of the list.
    pub fn step(self, direction: FontSizeDirection) -> Self {
        match direction {
            FontSizeDirection::Increase => Self {
                index: (self.index + 1).min(FONT_SIZE_STEPS.len() - 1),
            },
            FontSizeDirection::Decrease => Self {
                index: self.index.saturating_sub(1),
            },
            FontSizeDirection::Reset => Self::DEFAULT,
        }
    }

    pub fn can_increase(self) -> bool {
        self.index < FONT_SIZE_STEPS.len() - 1
    }

    pub fn can_decrease(self) -> bool {
        self.index > 0
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

impl TryFrom<u16> for FontSize {
    type Error = String;

    fn try_from(percent: u16) -> Result<Self, Self::Error> {
        Self::from_percent(percent).ok_or_else(|| format!("{} is not a font-size step", percent))
    }
}

impl From<FontSize> for u16 {
    fn from(size: FontSize) -> Self {
        size.percent()
    }
}

/// Direction of a font-size adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSizeDirection {
    Increase,
    Decrease,
    Reset,
}

impl std::str::FromStr for FontSizeDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increase" => Ok(FontSizeDirection::Increase),
            "decrease" => Ok(FontSizeDirection::Decrease),
            "reset" => Ok(FontSizeDirection::Reset),
            other => Err(format!("unknown font size direction: {}", other)),
        }
    }
}

/// Snapshot of the controller's user-facing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderModeState {
    pub enabled: bool,
    pub font_size: FontSize,
    pub hint_shown: bool,
}

impl Default for ReaderModeState {
    fn default() -> Self {
        Self {
            enabled: false,
            font_size: FontSize::DEFAULT,
            hint_shown: false,
        }
    }
}

/// Derived reading progress; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadingProgress {
    /// Share of the article scrolled past, in `[0, 100]`.
    pub percent_complete: f64,
    pub remaining_minutes: u32,
}

impl ReadingProgress {
    pub fn start(total_minutes: u32) -> Self {
        Self {
            percent_complete: 0.0,
            remaining_minutes: total_minutes,
        }
    }

    /// Text shown inside the progress ring.
    pub fn label(&self) -> String {
        match self.remaining_minutes {
            0 => "Done!".to_string(),
            1 => "< 1 min".to_string(),
            n => format!("{} min left", n),
        }
    }
}

/// Label, icon and ARIA state of the reader-mode toggle button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleAppearance {
    pub label: &'static str,
    pub icon_class: &'static str,
    pub pressed: bool,
}

impl ToggleAppearance {
    pub fn for_enabled(enabled: bool) -> Self {
        if enabled {
            Self {
                label: "Exit Reader",
                icon_class: "fas fa-times",
                pressed: true,
            }
        } else {
            Self {
                label: "Reader Mode",
                icon_class: "fas fa-book-reader",
                pressed: false,
            }
        }
    }
}

/// What the font-size control cluster displays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontControls {
    pub percent: u16,
    pub rem: f64,
    pub can_decrease: bool,
    pub can_increase: bool,
}

impl FontControls {
    pub fn new(size: FontSize, base_rem: f64) -> Self {
        Self {
            percent: size.percent(),
            rem: size.rem(base_rem),
            can_decrease: size.can_decrease(),
            can_increase: size.can_increase(),
        }
    }
}
