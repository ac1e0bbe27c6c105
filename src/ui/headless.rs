//! In-memory page model.
//!
//! Stands in for the browser DOM: queries answer from parsed markup, mutations
//! are recorded so callers can render or inspect them.

use std::collections::BTreeSet;

use serde::Serialize;
use uuid::Uuid;

use super::markup::PageMarkup;
use super::page_host::PageHost;
use crate::types::page::{ArticleBounds, NavDirection, NavLink, ScrollMetrics, Widget};
use crate::types::reader::{FontControls, ReadingProgress, ToggleAppearance};

/// A transient live-region node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Announcement {
    pub id: Uuid,
    pub message: String,
}

/// Headless implementation of [`PageHost`].
#[derive(Debug, Clone)]
pub struct HeadlessPage {
    markup: PageMarkup,
    bounds: Option<ArticleBounds>,
    scroll: ScrollMetrics,
    body_classes: BTreeSet<String>,
    widgets: Vec<Widget>,
    toggle: Option<ToggleAppearance>,
    hint_visible: bool,
    font: Option<FontControls>,
    progress: Option<ReadingProgress>,
    announcements: Vec<Announcement>,
    announcement_log: Vec<String>,
    article_scrolls: usize,
    navigations: Vec<String>,
}

/// Serializable snapshot of the page's visible state.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub body_classes: Vec<String>,
    pub widgets: Vec<Widget>,
    pub toggle: Option<ToggleAppearance>,
    pub hint_visible: bool,
    pub font: Option<FontControls>,
    pub progress: Option<ReadingProgress>,
    pub progress_label: Option<String>,
    pub announcements: Vec<Announcement>,
    pub navigations: Vec<String>,
}

impl HeadlessPage {
    pub fn new(markup: PageMarkup) -> Self {
        Self {
            markup,
            bounds: None,
            scroll: ScrollMetrics::default(),
            body_classes: BTreeSet::new(),
            widgets: Vec::new(),
            toggle: None,
            hint_visible: false,
            font: None,
            progress: None,
            announcements: Vec::new(),
            announcement_log: Vec::new(),
            article_scrolls: 0,
            navigations: Vec::new(),
        }
    }

    pub fn from_html(html: &str) -> Self {
        Self::new(PageMarkup::parse(html))
    }

    pub fn with_bounds(mut self, bounds: ArticleBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_viewport_height(mut self, height: f64) -> Self {
        self.scroll.viewport_height = height;
        self
    }

    /// Moves the viewport; the controller picks it up on the next scroll event.
    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.scroll.scroll_y = scroll_y.max(0.0);
    }

    pub fn markup(&self) -> &PageMarkup {
        &self.markup
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn toggle(&self) -> Option<&ToggleAppearance> {
        self.toggle.as_ref()
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn font(&self) -> Option<&FontControls> {
        self.font.as_ref()
    }

    pub fn progress(&self) -> Option<&ReadingProgress> {
        self.progress.as_ref()
    }

    /// Live-region nodes currently attached.
    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    /// Every message ever announced, oldest first.
    pub fn announcement_log(&self) -> &[String] {
        &self.announcement_log
    }

    pub fn article_scrolls(&self) -> usize {
        self.article_scrolls
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    pub fn view(&self) -> PageView {
        PageView {
            body_classes: self.body_classes.iter().cloned().collect(),
            widgets: self.widgets.clone(),
            toggle: self.toggle.clone(),
            hint_visible: self.hint_visible,
            font: self.font,
            progress: self.progress,
            progress_label: self.progress.map(|p| p.label()),
            announcements: self.announcements.clone(),
            navigations: self.navigations.clone(),
        }
    }
}

impl PageHost for HeadlessPage {
    fn has_article(&self) -> bool {
        self.markup.has_article
    }

    fn is_chapter_index(&self) -> bool {
        self.markup.is_chapter_index
    }

    fn has_toggle(&self) -> bool {
        self.markup.has_toggle
    }

    fn nav_link(&self, direction: NavDirection) -> Option<NavLink> {
        self.markup.link(direction).cloned()
    }

    fn article_text(&self) -> String {
        self.markup.article_text.clone()
    }

    fn article_bounds(&self) -> Option<ArticleBounds> {
        self.bounds
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.scroll
    }

    fn mount(&mut self, widget: Widget) {
        self.widgets.push(widget);
    }

    fn set_body_class(&mut self, class: &str, present: bool) {
        if present {
            self.body_classes.insert(class.to_string());
        } else {
            self.body_classes.remove(class);
        }
    }

    fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    fn set_toggle_appearance(&mut self, appearance: &ToggleAppearance) {
        if self.markup.has_toggle {
            self.toggle = Some(appearance.clone());
        }
    }

    fn set_hint_visible(&mut self, visible: bool) {
        self.hint_visible = visible;
    }

    fn apply_font_size(&mut self, controls: &FontControls) {
        self.font = Some(*controls);
    }

    fn render_progress(&mut self, progress: &ReadingProgress) {
        self.progress = Some(*progress);
    }

    fn announce(&mut self, id: Uuid, message: &str) {
        self.announcements.push(Announcement {
            id,
            message: message.to_string(),
        });
        self.announcement_log.push(message.to_string());
    }

    fn remove_announcement(&mut self, id: Uuid) {
        self.announcements.retain(|a| a.id != id);
    }

    fn scroll_to_article(&mut self) {
        self.article_scrolls += 1;
        if let Some(bounds) = self.bounds {
            self.scroll.scroll_y = bounds.top.max(0.0);
        }
    }

    fn navigate(&mut self, href: &str) {
        self.navigations.push(href.to_string());
    }
}
