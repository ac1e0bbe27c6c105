//! The page surface the reader-mode controller reads from and writes to.
//!
//! Queries describe the theme's markup; every lookup is optional. Mutations
//! are the DOM changes reader mode makes.

use uuid::Uuid;

use crate::types::page::{ArticleBounds, NavDirection, NavLink, ScrollMetrics, Widget};
use crate::types::reader::{FontControls, ReadingProgress, ToggleAppearance};

/// Body class carrying the reader layout.
pub const READER_MODE_CLASS: &str = "reader-mode";
/// Body class present while the layout animates.
pub const TRANSITIONING_CLASS: &str = "reader-mode-transitioning";

/// Trait defining the page operations reader mode depends on.
pub trait PageHost {
    // ─── Queries ───

    /// `#body-inner` is present.
    fn has_article(&self) -> bool;
    /// `#chapter` is present.
    fn is_chapter_index(&self) -> bool;
    /// `.reader-mode-toggle` is present.
    fn has_toggle(&self) -> bool;
    fn nav_link(&self, direction: NavDirection) -> Option<NavLink>;
    /// Text content of the article region, empty when absent.
    fn article_text(&self) -> String;
    fn article_bounds(&self) -> Option<ArticleBounds>;
    fn scroll_metrics(&self) -> ScrollMetrics;

    // ─── Mutations ───

    fn mount(&mut self, widget: Widget);
    fn set_body_class(&mut self, class: &str, present: bool);
    fn has_body_class(&self, class: &str) -> bool;
    fn set_toggle_appearance(&mut self, appearance: &ToggleAppearance);
    fn set_hint_visible(&mut self, visible: bool);
    fn apply_font_size(&mut self, controls: &FontControls);
    fn render_progress(&mut self, progress: &ReadingProgress);
    /// Appends a polite, atomic live-region node carrying `message`.
    fn announce(&mut self, id: Uuid, message: &str);
    fn remove_announcement(&mut self, id: Uuid);
    /// Smoothly scrolls `#main-content` to the top of the viewport.
    fn scroll_to_article(&mut self);
    fn navigate(&mut self, href: &str);
}
