//! yaub-reader console demo.
//!
//! Loads a sample article into the headless page, drives reader mode through
//! its keyboard and scroll handlers, and prints what the page would show.

use std::sync::Arc;

use yaub_reader::database::preferences::{FallbackStore, MemoryPreferenceStore};
use yaub_reader::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use yaub_reader::services::reader_mode::{ReaderModeApi, ReaderModeController};
use yaub_reader::services::scheduler::ManualClock;
use yaub_reader::types::keyboard::KeyEvent;
use yaub_reader::types::page::ArticleBounds;
use yaub_reader::types::settings::ReaderConfig;
use yaub_reader::ui::headless::HeadlessPage;

const SAMPLE_PAGE: &str = r##"<html><body>
  <a class="reader-mode-toggle" href="#"><i class="fas fa-book-reader"></i><span class="toggle-text">Reader Mode</span></a>
  <div id="main-content">
    <div id="body-inner">
      <h1>Tuning the page cache</h1>
      <p>WORDS</p>
    </div>
  </div>
  <a class="nav nav-prev" href="/posts/io-scheduling/" title="I/O scheduling">Previous</a>
  <a class="nav nav-next" href="/posts/writeback/">Next</a>
</body></html>"##;

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn main() {
    println!();
    println!("yaub-reader v{}: reader mode demo", env!("CARGO_PKG_VERSION"));
    println!();

    let words = vec!["lorem"; 1540].join(" ");
    let html = SAMPLE_PAGE.replace("WORDS", &words);
    let page = HeadlessPage::from_html(&html)
        .with_bounds(ArticleBounds { top: 120.0, height: 5200.0 })
        .with_viewport_height(900.0);

    let clock = ManualClock::new(0);
    let mut reader = match ReaderModeController::initialize(
        page,
        FallbackStore::new(MemoryPreferenceStore::new()),
        Arc::new(clock.clone()),
        ReaderConfig::default(),
    ) {
        Ok(reader) => reader,
        Err(e) => {
            println!("  reader mode unavailable: {}", e);
            return;
        }
    };

    section("Initialization");
    println!("  widgets:        {:?}", reader.page().widgets());
    println!("  reading time:   {} min", reader.total_minutes());
    println!("  font size:      {}", reader.font_size());

    section("Keyboard");
    reader.handle_key(&KeyEvent::new("r"));
    println!("  'r' pressed     enabled = {}", reader.is_enabled());
    println!("  hint visible:   {}", reader.page().hint_visible());
    for key in ["+", "+", "+"] {
        reader.handle_key(&KeyEvent::new(key));
    }
    println!("  '+' x3          font = {}", reader.font_size());

    section("Scrolling");
    for y in [120.0, 1200.0, 2400.0, 4420.0] {
        clock.advance(150);
        reader.page_mut().scroll_to(y);
        if let Some(progress) = reader.handle_scroll() {
            println!("  y={:>6.0}  {:>5.1}%  {}", y, progress.percent_complete, progress.label());
        }
    }

    section("Timers");
    clock.advance(4000);
    let ran = reader.run_due_tasks();
    println!("  ran {} task(s); hint visible = {}", ran, reader.page().hint_visible());
    reader.handle_key(&KeyEvent::new("Escape"));
    println!("  Esc pressed     enabled = {}", reader.is_enabled());
    println!("  announcements:  {:?}", reader.page().announcement_log());

    section("Shortcuts");
    for entry in ShortcutManager::new().help_entries() {
        println!("  {:<8} {}", entry.keys, entry.description);
    }
}
