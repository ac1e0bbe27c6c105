//! App Core for yaub-reader.
//!
//! Holds configuration, the clock and the currently loaded page. Loading a page
//! drops the previous page's controller, like a browser navigation does.

use std::path::PathBuf;
use std::sync::Arc;

use crate::database::preferences::{FallbackStore, SqlitePreferenceStore};
use crate::managers::shortcut_manager::ShortcutManager;
use crate::services::reader_mode::ReaderModeController;
use crate::services::scheduler::{Clock, SystemClock};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::ReaderError;
use crate::types::page::{ArticleBounds, ScrollMetrics};
use crate::types::reader::ReadingProgress;
use crate::ui::headless::{HeadlessPage, PageView};

/// Reader-mode controller as wired by the app.
pub type PageController = ReaderModeController<HeadlessPage, SqlitePreferenceStore>;

/// The page currently loaded.
pub enum PageSession {
    Reader(Box<PageController>),
    /// A page without reader mode, and why.
    Plain { page: HeadlessPage, reason: ReaderError },
}

/// Geometry supplied with a loaded page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageGeometry {
    pub article: Option<ArticleBounds>,
    pub viewport_height: Option<f64>,
}

/// Central application struct.
pub struct App {
    db_path: PathBuf,
    pub settings_engine: SettingsEngine,
    pub shortcut_manager: ShortcutManager,
    clock: Arc<dyn Clock>,
    session: Option<PageSession>,
}

impl App {
    /// Creates an App storing preferences in `db_path`.
    ///
    /// `config_path` overrides the location of `reader.json`. A missing or
    /// unreadable config falls back to defaults.
    pub fn new(db_path: &str, config_path: Option<String>) -> Self {
        let mut settings_engine = SettingsEngine::new(config_path);
        if let Err(e) = settings_engine.load() {
            tracing::warn!(error = %e, "reader config unreadable; using defaults");
        }

        Self {
            db_path: PathBuf::from(db_path),
            settings_engine,
            shortcut_manager: ShortcutManager::new(),
            clock: Arc::new(SystemClock::new()),
            session: None,
        }
    }

    /// Replaces the clock used by controllers created afterwards.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn open_store(&self) -> FallbackStore<SqlitePreferenceStore> {
        match SqlitePreferenceStore::open(&self.db_path) {
            Ok(store) => FallbackStore::new(store),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.db_path.display(), "preference database unavailable; preferences last for this page only");
                FallbackStore::volatile()
            }
        }
    }

    /// Loads a rendered page and attaches reader mode if the page offers it.
    ///
    /// # Errors
    /// Returns why the page has no reader mode; the page is still loaded.
    pub fn load_page(&mut self, html: &str, geometry: PageGeometry) -> Result<(), ReaderError> {
        let mut page = HeadlessPage::from_html(html);
        if let Some(bounds) = geometry.article {
            page = page.with_bounds(bounds);
        }
        if let Some(height) = geometry.viewport_height {
            page = page.with_viewport_height(height);
        }

        // Drop the previous page before opening the store again.
        self.session = None;

        if let Err(reason) = PageController::check_page(&page) {
            tracing::debug!(%reason, "page loaded without reader mode");
            self.session = Some(PageSession::Plain {
                page,
                reason: reason.clone(),
            });
            return Err(reason);
        }

        let controller = PageController::initialize(
            page,
            self.open_store(),
            self.clock.clone(),
            self.settings_engine.get_settings().clone(),
        )?;
        self.session = Some(PageSession::Reader(Box::new(controller)));
        Ok(())
    }

    pub fn has_page(&self) -> bool {
        self.session.is_some()
    }

    pub fn reader(&self) -> Option<&PageController> {
        match self.session.as_ref()? {
            PageSession::Reader(controller) => Some(&**controller),
            PageSession::Plain { .. } => None,
        }
    }

    pub fn reader_mut(&mut self) -> Option<&mut PageController> {
        match self.session.as_mut()? {
            PageSession::Reader(controller) => Some(&mut **controller),
            PageSession::Plain { .. } => None,
        }
    }

    fn page_mut(&mut self) -> Option<&mut HeadlessPage> {
        match self.session.as_mut()? {
            PageSession::Reader(controller) => Some(controller.page_mut()),
            PageSession::Plain { page, .. } => Some(page),
        }
    }

    pub fn page_view(&self) -> Option<PageView> {
        match self.session.as_ref()? {
            PageSession::Reader(controller) => Some(controller.page().view()),
            PageSession::Plain { page, .. } => Some(page.view()),
        }
    }

    /// Scrolls the loaded page and feeds the throttled scroll handler.
    pub fn scroll(&mut self, scroll_y: f64) -> Option<ReadingProgress> {
        self.page_mut()?.scroll_to(scroll_y);
        self.reader_mut()?.handle_scroll()
    }

    pub fn scroll_metrics(&mut self) -> Option<ScrollMetrics> {
        use crate::ui::page_host::PageHost;
        self.page_mut().map(|page| page.scroll_metrics())
    }

    /// Runs due timer tasks on the loaded page.
    pub fn tick(&mut self) -> usize {
        self.reader_mut().map_or(0, |controller| controller.run_due_tasks())
    }
}
