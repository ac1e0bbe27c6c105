//! Unit tests for the RPC handler: every JSON-RPC method dispatched by `handle_method`.
//!
//! These tests run the same code path as the `yaub-reader-rpc` binary, with a
//! temporary on-disk SQLite database and config file and a manual clock.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tempfile::TempDir;

use yaub_reader::app::App;
use yaub_reader::rpc_handler::handle_method;
use yaub_reader::services::scheduler::ManualClock;

const ARTICLE: &str = r##"<html><body>
    <a class="reader-mode-toggle" href="#"><i class="fas fa-book-reader"></i><span class="toggle-text">Reader Mode</span></a>
    <div id="main-content"><div id="body-inner"><p>WORDS</p></div></div>
    <a class="nav nav-next" href="/posts/next/">next</a>
</body></html>"##;

fn article(words: usize) -> String {
    ARTICLE.replace("WORDS", &vec!["w"; words].join(" "))
}

/// Create a fresh App backed by a temp directory.
fn setup() -> (Mutex<App>, ManualClock, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let db_path = tmp.path().join("prefs.db");
    let config_path = tmp.path().join("reader.json").to_string_lossy().to_string();
    let clock = ManualClock::new(0);
    let app = App::new(db_path.to_str().unwrap(), Some(config_path))
        .with_clock(Arc::new(clock.clone()));
    (Mutex::new(app), clock, tmp)
}

fn load(app: &Mutex<App>, words: usize) -> Value {
    handle_method(app, "page.load", &json!({
        "html": article(words),
        "article_top": 0.0,
        "article_height": 1100.0,
        "viewport_height": 100.0,
    }))
    .unwrap()
}

#[test]
fn test_ping() {
    let (app, _clock, _tmp) = setup();
    assert_eq!(handle_method(&app, "ping", &json!({})).unwrap(), json!({"pong": true}));
}

#[test]
fn test_unknown_method_returns_error() {
    let (app, _clock, _tmp) = setup();
    let res = handle_method(&app, "nonexistent.method", &json!({}));
    assert!(res.unwrap_err().contains("unknown method"));
}

#[test]
fn test_reader_calls_before_page_load_fail() {
    let (app, _clock, _tmp) = setup();
    assert!(handle_method(&app, "reader.toggle", &json!({})).is_err());
    assert!(handle_method(&app, "page.view", &json!({})).is_err());
}

#[test]
fn test_page_load_reports_reader_mode() {
    let (app, _clock, _tmp) = setup();
    let res = load(&app, 440);
    assert_eq!(res["reader_mode"], true);
    assert_eq!(res["state"]["enabled"], false);
    assert_eq!(res["state"]["font_size"], 100);
    assert_eq!(res["state"]["total_minutes"], 2);

    let plain = handle_method(&app, "page.load", &json!({"html": "<p>index</p>"})).unwrap();
    assert_eq!(plain["reader_mode"], false);
    assert!(plain["reason"].as_str().unwrap().contains("article"));
    assert!(handle_method(&app, "reader.is_enabled", &json!({})).is_err());
}

#[test]
fn test_global_object_methods() {
    let (app, _clock, _tmp) = setup();
    load(&app, 100);

    assert_eq!(handle_method(&app, "reader.is_enabled", &json!({})).unwrap()["enabled"], false);
    assert_eq!(handle_method(&app, "reader.enable", &json!({})).unwrap()["enabled"], true);
    assert_eq!(handle_method(&app, "reader.enable", &json!({})).unwrap()["enabled"], true);
    assert_eq!(handle_method(&app, "reader.toggle", &json!({})).unwrap()["enabled"], false);
    assert_eq!(handle_method(&app, "reader.toggle", &json!({})).unwrap()["enabled"], true);
    assert_eq!(handle_method(&app, "reader.disable", &json!({})).unwrap()["enabled"], false);
}

#[test]
fn test_preferences_persist_across_page_loads() {
    let (app, _clock, _tmp) = setup();
    load(&app, 100);
    handle_method(&app, "reader.enable", &json!({})).unwrap();
    handle_method(&app, "reader.font", &json!({"direction": "increase"})).unwrap();

    let res = load(&app, 100);
    assert_eq!(res["state"]["enabled"], true);
    assert_eq!(res["state"]["font_size"], 110);
}

#[test]
fn test_font_direction_validation() {
    let (app, _clock, _tmp) = setup();
    load(&app, 100);
    assert!(handle_method(&app, "reader.font", &json!({"direction": "bigger"})).is_err());
    assert!(handle_method(&app, "reader.font", &json!({})).is_err());
    let res = handle_method(&app, "reader.font", &json!({"direction": "decrease"})).unwrap();
    assert_eq!(res["font_size"], 90);
}

#[test]
fn test_scroll_and_throttle() {
    let (app, clock, _tmp) = setup();
    load(&app, 440);

    let first = handle_method(&app, "page.scroll", &json!({"y": 400.0})).unwrap();
    assert_eq!(first["updated"], true);
    assert!((first["percent_complete"].as_f64().unwrap() - 40.0).abs() < 1e-9);
    assert_eq!(first["label"], "2 min left");

    clock.advance(30);
    let dropped = handle_method(&app, "page.scroll", &json!({"y": 1000.0})).unwrap();
    assert_eq!(dropped["updated"], false);
    assert_eq!(dropped["scroll_y"], 1000.0);
    assert_eq!(dropped["label"], "2 min left");

    clock.advance(100);
    let done = handle_method(&app, "page.scroll", &json!({"y": 1000.0})).unwrap();
    assert_eq!(done["label"], "Done!");
}

#[test]
fn test_key_events_and_tick() {
    let (app, clock, _tmp) = setup();
    load(&app, 100);

    let res = handle_method(&app, "page.key", &json!({"key": "r"})).unwrap();
    assert_eq!(res["handled"], true);
    let typing = handle_method(&app, "page.key", &json!({"key": "r", "target": "text_input"})).unwrap();
    assert_eq!(typing["handled"], false);

    let view = handle_method(&app, "page.view", &json!({})).unwrap();
    assert_eq!(view["hint_visible"], true);
    assert!(view["body_classes"].as_array().unwrap().contains(&json!("reader-mode-transitioning")));
    assert_eq!(view["announcements"].as_array().unwrap().len(), 1);

    clock.advance(4000);
    let ticked = handle_method(&app, "page.tick", &json!({})).unwrap();
    assert_eq!(ticked["ran"], 3);

    let view = handle_method(&app, "page.view", &json!({})).unwrap();
    assert_eq!(view["hint_visible"], false);
    assert_eq!(view["body_classes"], json!(["reader-mode"]));
    assert!(view["announcements"].as_array().unwrap().is_empty());

    let nav = handle_method(&app, "page.key", &json!({"key": "ArrowRight"})).unwrap();
    assert_eq!(nav["handled"], true);
    let view = handle_method(&app, "page.view", &json!({})).unwrap();
    assert_eq!(view["navigations"], json!(["/posts/next/"]));
}

#[test]
fn test_invalid_key_event() {
    let (app, _clock, _tmp) = setup();
    load(&app, 10);
    assert!(handle_method(&app, "page.key", &json!({"ctrl": true})).is_err());
}

#[test]
fn test_shortcuts_listing() {
    let (app, _clock, _tmp) = setup();
    let res = handle_method(&app, "reader.shortcuts", &json!({})).unwrap();
    assert_eq!(res["category"], "Reading");
    let items = res["items"].as_array().unwrap();
    assert_eq!(items[0]["html"], "<kbd>R</kbd>");
}

#[test]
fn test_settings_get_and_set() {
    let (app, _clock, _tmp) = setup();
    let settings = handle_method(&app, "settings.get", &json!({})).unwrap();
    assert_eq!(settings["reading"]["words_per_minute"], 220);

    handle_method(&app, "settings.set", &json!({"key": "reading.words_per_minute", "value": 110})).unwrap();
    let res = load(&app, 440);
    assert_eq!(res["state"]["total_minutes"], 4);

    assert!(handle_method(&app, "settings.set", &json!({"key": "reading.nope", "value": 1})).is_err());
}

#[test]
fn test_out_of_range_timing_rejected_and_reader_keeps_working() {
    let (app, _clock, _tmp) = setup();
    let res = handle_method(
        &app,
        "settings.set",
        &json!({"key": "timing.transition_ms", "value": u64::MAX}),
    );
    assert!(res.unwrap_err().contains("transition_ms"));

    let settings = handle_method(&app, "settings.get", &json!({})).unwrap();
    assert_eq!(settings["timing"]["transition_ms"], 400);

    load(&app, 100);
    assert_eq!(handle_method(&app, "reader.toggle", &json!({})).unwrap()["enabled"], true);
    assert_eq!(handle_method(&app, "reader.is_enabled", &json!({})).unwrap()["enabled"], true);
}
