//! Reader Mode controller.
//!
//! Owns the reader-mode flag, the font-size step and the reading progress of
//! one article page. Page effects go through [`PageHost`], preferences through
//! a [`FallbackStore`], and every delayed effect through a cancellable
//! [`Scheduler`] task that the host drains with [`ReaderModeController::run_due_tasks`].

use std::sync::Arc;

use uuid::Uuid;

use crate::database::preferences::{FallbackStore, PreferenceStore};
use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use crate::services::reading_progress::{count_words, ProgressTracker};
use crate::services::scheduler::{Clock, Scheduler, TaskHandle};
use crate::types::errors::ReaderError;
use crate::types::keyboard::{KeyEvent, ReaderAction};
use crate::types::page::{NavDirection, Widget};
use crate::types::reader::{
    FontControls, FontSize, FontSizeDirection, ReaderModeState, ReadingProgress, ToggleAppearance,
};
use crate::types::settings::ReaderConfig;
use crate::ui::page_host::{PageHost, READER_MODE_CLASS, TRANSITIONING_CLASS};

const ENABLED_MESSAGE: &str = "Reader mode enabled. Press Escape to exit.";
const DISABLED_MESSAGE: &str = "Reader mode disabled.";

/// The operations other page scripts may call, mirroring `window.ReaderMode`.
pub trait ReaderModeApi {
    fn enable(&mut self);
    fn disable(&mut self);
    fn toggle(&mut self);
    fn is_enabled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScheduledTask {
    EndTransition,
    HideHint,
    RemoveAnnouncement(Uuid),
}

/// Reader mode for a single article page.
pub struct ReaderModeController<P, S> {
    page: P,
    store: FallbackStore<S>,
    clock: Arc<dyn Clock>,
    config: ReaderConfig,
    shortcuts: ShortcutManager,
    scheduler: Scheduler<ScheduledTask>,
    progress: ProgressTracker,
    state: ReaderModeState,
    hint_task: Option<TaskHandle>,
    transition_task: Option<TaskHandle>,
}

impl<P: PageHost, S: PreferenceStore> ReaderModeController<P, S> {
    /// Checks that `page` offers reader mode.
    pub fn check_page(page: &P) -> Result<(), ReaderError> {
        if !page.has_article() {
            return Err(ReaderError::NotAnArticle);
        }
        if page.is_chapter_index() {
            return Err(ReaderError::ChapterIndex);
        }
        if !page.has_toggle() {
            return Err(ReaderError::MissingToggle);
        }
        Ok(())
    }

    /// Builds the reader-mode widgets and restores persisted preferences.
    ///
    /// # Errors
    /// Returns a [`ReaderError`] when the page does not qualify; nothing is
    /// mounted in that case.
    pub fn initialize(
        mut page: P,
        store: FallbackStore<S>,
        clock: Arc<dyn Clock>,
        config: ReaderConfig,
    ) -> Result<Self, ReaderError> {
        Self::check_page(&page)?;

        page.mount(Widget::ExitButton);
        for direction in [NavDirection::Previous, NavDirection::Next] {
            if let Some(link) = page.nav_link(direction) {
                let title = link
                    .title
                    .clone()
                    .unwrap_or_else(|| direction.fallback_title().to_string());
                page.mount(Widget::Nav {
                    direction,
                    href: link.href,
                    title,
                });
            }
        }
        page.mount(Widget::KeyboardHint);
        page.mount(Widget::FontControls);
        page.mount(Widget::ProgressRing);

        let word_count = count_words(&page.article_text());
        let progress = ProgressTracker::new(
            word_count,
            config.reading.words_per_minute,
            config.timing.scroll_throttle_ms,
        );

        let font_size = match store.get(&config.storage_keys.font_size) {
            Some(raw) => FontSize::parse(&raw).unwrap_or_else(|| {
                tracing::debug!(value = %raw, "discarding unknown stored font size");
                FontSize::DEFAULT
            }),
            None => FontSize::DEFAULT,
        };
        let hint_shown = store
            .get(&config.storage_keys.hint_shown)
            .is_some_and(|v| !v.is_empty());
        let restore_enabled = store.get(&config.storage_keys.enabled).as_deref() == Some("true");

        let mut controller = Self {
            page,
            store,
            clock,
            config,
            shortcuts: ShortcutManager::new(),
            scheduler: Scheduler::new(),
            progress,
            state: ReaderModeState {
                enabled: false,
                font_size,
                hint_shown,
            },
            hint_task: None,
            transition_task: None,
        };

        controller.apply_font_size();
        controller
            .page
            .set_toggle_appearance(&ToggleAppearance::for_enabled(false));
        if restore_enabled {
            controller.set_enabled(true, false, false);
        }
        controller.update_reading_progress();

        tracing::debug!(
            word_count,
            total_minutes = controller.progress.total_minutes(),
            enabled = controller.state.enabled,
            font_size = controller.state.font_size.percent(),
            "reader mode initialized"
        );
        Ok(controller)
    }

    pub fn state(&self) -> ReaderModeState {
        self.state
    }

    pub fn font_size(&self) -> FontSize {
        self.state.font_size
    }

    pub fn progress(&self) -> ReadingProgress {
        self.progress.current()
    }

    pub fn total_minutes(&self) -> u32 {
        self.progress.total_minutes()
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn store(&self) -> &FallbackStore<S> {
        &self.store
    }

    /// True while the keyboard hint's auto-hide is still scheduled.
    pub fn hint_pending(&self) -> bool {
        self.hint_task
            .is_some_and(|handle| self.scheduler.is_pending(handle))
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Earliest deadline among scheduled tasks, in clock milliseconds.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    /// Switches reader mode on. No-op if already on.
    pub fn enable_reader(&mut self, animate: bool) {
        self.set_enabled(true, animate, true);
    }

    /// Switches reader mode off. No-op if already off.
    pub fn disable_reader(&mut self, animate: bool) {
        self.set_enabled(false, animate, true);
    }

    fn set_enabled(&mut self, enabled: bool, animate: bool, persist: bool) {
        if self.state.enabled == enabled {
            return;
        }
        self.state.enabled = enabled;

        if animate {
            self.begin_transition();
        }
        self.page.set_body_class(READER_MODE_CLASS, enabled);
        if persist {
            let value = if enabled { "true" } else { "false" };
            self.store.set(&self.config.storage_keys.enabled, value);
        }
        self.page
            .set_toggle_appearance(&ToggleAppearance::for_enabled(enabled));

        if enabled {
            if animate && !self.state.hint_shown {
                self.show_hint();
                self.state.hint_shown = true;
                self.store.set(&self.config.storage_keys.hint_shown, "true");
            }
            if animate {
                self.page.scroll_to_article();
            }
            self.announce(ENABLED_MESSAGE);
        } else {
            self.hide_hint();
            self.announce(DISABLED_MESSAGE);
        }

        tracing::debug!(enabled, animate, "reader mode changed");
    }

    /// Moves one font-size step, or back to 100% on reset.
    ///
    /// At either end of the step list this is a no-op: nothing is applied or stored.
    pub fn adjust_font_size(&mut self, direction: FontSizeDirection) -> FontSize {
        let next = self.state.font_size.step(direction);
        if next == self.state.font_size {
            return next;
        }
        self.state.font_size = next;
        self.apply_font_size();
        self.store.set(
            &self.config.storage_keys.font_size,
            &next.percent().to_string(),
        );
        tracing::debug!(font_size = next.percent(), "font size changed");
        next
    }

    fn apply_font_size(&mut self) {
        let controls = FontControls::new(self.state.font_size, self.config.reading.base_font_rem);
        self.page.apply_font_size(&controls);
    }

    /// Throttled scroll handler. Returns the new progress when it was recomputed.
    pub fn handle_scroll(&mut self) -> Option<ReadingProgress> {
        let bounds = self.page.article_bounds()?;
        let now = self.clock.now_ms();
        let progress = self
            .progress
            .on_scroll(now, bounds, self.page.scroll_metrics())?;
        self.page.render_progress(&progress);
        Some(progress)
    }

    /// Recomputes and renders progress without throttling.
    pub fn update_reading_progress(&mut self) -> ReadingProgress {
        let progress = match self.page.article_bounds() {
            Some(bounds) => self.progress.recompute(bounds, self.page.scroll_metrics()),
            None => self.progress.current(),
        };
        self.page.render_progress(&progress);
        progress
    }

    /// Document-level `keydown`. Returns true when the key was consumed.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let Some(action) = self.shortcuts.resolve(event, self.state.enabled) else {
            return false;
        };
        match action {
            ReaderAction::Toggle => self.toggle(),
            ReaderAction::Exit => self.disable_reader(true),
            ReaderAction::Navigate(direction) => match self.page.nav_link(direction) {
                Some(link) if !link.href.is_empty() => self.page.navigate(&link.href),
                _ => return false,
            },
            ReaderAction::AdjustFont(direction) => {
                self.adjust_font_size(direction);
            }
        }
        true
    }

    /// Runs every scheduled task whose deadline has passed. Returns how many ran.
    pub fn run_due_tasks(&mut self) -> usize {
        let due = self.scheduler.take_due(self.clock.now_ms());
        let count = due.len();
        for (handle, task) in due {
            match task {
                ScheduledTask::EndTransition => {
                    if self.transition_task == Some(handle) {
                        self.transition_task = None;
                    }
                    self.page.set_body_class(TRANSITIONING_CLASS, false);
                }
                ScheduledTask::HideHint => {
                    if self.hint_task == Some(handle) {
                        self.hint_task = None;
                    }
                    self.page.set_hint_visible(false);
                }
                ScheduledTask::RemoveAnnouncement(id) => self.page.remove_announcement(id),
            }
        }
        count
    }

    fn begin_transition(&mut self) {
        self.page.set_body_class(TRANSITIONING_CLASS, true);
        if let Some(handle) = self.transition_task.take() {
            self.scheduler.cancel(handle);
        }
        let deadline = self.clock.now_ms().saturating_add(self.config.timing.transition_ms);
        self.transition_task = Some(self.scheduler.schedule(deadline, ScheduledTask::EndTransition));
    }

    fn show_hint(&mut self) {
        self.page.set_hint_visible(true);
        if let Some(handle) = self.hint_task.take() {
            self.scheduler.cancel(handle);
        }
        let deadline = self.clock.now_ms().saturating_add(self.config.timing.hint_ms);
        self.hint_task = Some(self.scheduler.schedule(deadline, ScheduledTask::HideHint));
    }

    fn hide_hint(&mut self) {
        self.page.set_hint_visible(false);
        if let Some(handle) = self.hint_task.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn announce(&mut self, message: &str) {
        let id = Uuid::new_v4();
        self.page.announce(id, message);
        let deadline = self.clock.now_ms().saturating_add(self.config.timing.announcement_ms);
        self.scheduler
            .schedule(deadline, ScheduledTask::RemoveAnnouncement(id));
    }
}

impl<P: PageHost, S: PreferenceStore> ReaderModeApi for ReaderModeController<P, S> {
    fn enable(&mut self) {
        self.enable_reader(true);
    }

    fn disable(&mut self) {
        self.disable_reader(true);
    }

    fn toggle(&mut self) {
        if self.state.enabled {
            self.disable_reader(true);
        } else {
            self.enable_reader(true);
        }
    }

    fn is_enabled(&self) -> bool {
        self.state.enabled
    }
}
