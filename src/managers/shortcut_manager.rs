//! Shortcut Manager for reader mode.
//!
//! Resolves document-level key presses into reader actions and lists the
//! bindings for the keyboard-shortcuts help dialog.

use serde::Serialize;

use crate::types::keyboard::{KeyEvent, ReaderAction};
use crate::types::page::NavDirection;
use crate::types::reader::FontSizeDirection;

/// One row of the shortcuts help dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutHelp {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Trait defining shortcut resolution.
pub trait ShortcutManagerTrait {
    fn resolve(&self, event: &KeyEvent, reader_enabled: bool) -> Option<ReaderAction>;
    fn help_entries(&self) -> Vec<ShortcutHelp>;
}

/// Fixed reader-mode key bindings.
#[derive(Debug, Default, Clone)]
pub struct ShortcutManager;

impl ShortcutManager {
    pub fn new() -> Self {
        Self
    }

    /// Renders space-separated keys as `<kbd>` elements; `/` becomes a separator.
    pub fn format_keys(keys: &str) -> String {
        keys.split(' ')
            .filter(|k| !k.is_empty())
            .map(|key| {
                if key == "/" {
                    "<span class=\"shortcut-separator\">/</span>".to_string()
                } else {
                    format!("<kbd>{}</kbd>", key)
                }
            })
            .collect()
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    fn resolve(&self, event: &KeyEvent, reader_enabled: bool) -> Option<ReaderAction> {
        if event.target.is_editable() {
            return None;
        }

        match event.key.as_str() {
            "r" | "R" if !event.has_command_modifier() => Some(ReaderAction::Toggle),
            "Escape" if reader_enabled => Some(ReaderAction::Exit),
            "ArrowLeft" if reader_enabled => Some(ReaderAction::Navigate(NavDirection::Previous)),
            "ArrowRight" if reader_enabled => Some(ReaderAction::Navigate(NavDirection::Next)),
            // Ctrl/Cmd with these keys is browser zoom; leave it alone.
            "+" | "=" if reader_enabled && !event.has_command_modifier() => {
                Some(ReaderAction::AdjustFont(FontSizeDirection::Increase))
            }
            "-" | "_" if reader_enabled && !event.has_command_modifier() => {
                Some(ReaderAction::AdjustFont(FontSizeDirection::Decrease))
            }
            "0" if reader_enabled && !event.has_command_modifier() => {
                Some(ReaderAction::AdjustFont(FontSizeDirection::Reset))
            }
            _ => None,
        }
    }

    fn help_entries(&self) -> Vec<ShortcutHelp> {
        vec![
            ShortcutHelp { keys: "R", description: "Toggle reader mode" },
            ShortcutHelp { keys: "+ / −", description: "Adjust font size (reader mode)" },
            ShortcutHelp { keys: "Esc", description: "Exit reader mode" },
            ShortcutHelp { keys: "← →", description: "Previous / next article (reader mode)" },
        ]
    }
}
