use serde::{Deserialize, Serialize};

use super::page::NavDirection;
use super::reader::FontSizeDirection;

/// Element that had focus when a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    #[default]
    Document,
    TextInput,
    TextArea,
    Select,
    ContentEditable,
}

impl FocusTarget {
    /// True when the user is typing and page shortcuts must stay quiet.
    pub fn is_editable(self) -> bool {
        !matches!(self, FocusTarget::Document)
    }
}

/// A document-level `keydown`, reduced to what the shortcuts look at.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub target: FocusTarget,
}

impl KeyEvent {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn in_target(mut self, target: FocusTarget) -> Self {
        self.target = target;
        self
    }

    /// Ctrl, Meta or Alt held. Shift is not a command modifier here.
    pub fn has_command_modifier(&self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

/// What a resolved shortcut asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReaderAction {
    Toggle,
    Exit,
    Navigate(NavDirection),
    AdjustFont(FontSizeDirection),
}
