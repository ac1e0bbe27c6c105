//! RPC method handler for the yaub-reader JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested. `handle_method`
//! dispatches page events and the `window.ReaderMode` calls to the [`App`].

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::{App, PageController, PageGeometry};
use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use crate::services::reader_mode::ReaderModeApi;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::keyboard::KeyEvent;
use crate::types::page::ArticleBounds;
use crate::types::reader::FontSizeDirection;

const NO_READER: &str = "reader mode is not available on this page";

fn with_reader<T>(
    app: &Mutex<App>,
    f: impl FnOnce(&mut PageController) -> T,
) -> Result<T, String> {
    let mut a = app.lock().map_err(|e| e.to_string())?;
    let controller = a.reader_mut().ok_or(NO_READER)?;
    Ok(f(controller))
}

fn reader_state(controller: &PageController) -> Value {
    let state = controller.state();
    let progress = controller.progress();
    json!({
        "enabled": state.enabled,
        "font_size": state.font_size.percent(),
        "hint_shown": state.hint_shown,
        "progress": {
            "percent_complete": progress.percent_complete,
            "remaining_minutes": progress.remaining_minutes,
            "label": progress.label(),
        },
        "total_minutes": controller.total_minutes(),
        "pending_tasks": controller.pending_tasks(),
    })
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Page events ───
        "page.load" => {
            let html = params.get("html").and_then(|v| v.as_str()).ok_or("missing html")?;
            let article = match (
                params.get("article_top").and_then(|v| v.as_f64()),
                params.get("article_height").and_then(|v| v.as_f64()),
            ) {
                (Some(top), Some(height)) if height >= 0.0 => Some(ArticleBounds { top, height }),
                _ => None,
            };
            let geometry = PageGeometry {
                article,
                viewport_height: params.get("viewport_height").and_then(|v| v.as_f64()),
            };
            let mut a = app.lock().map_err(|e| e.to_string())?;
            match a.load_page(html, geometry) {
                Ok(()) => {
                    let controller = a.reader().ok_or(NO_READER)?;
                    Ok(json!({"reader_mode": true, "state": reader_state(controller)}))
                }
                Err(reason) => Ok(json!({"reader_mode": false, "reason": reason.to_string()})),
            }
        }
        "page.scroll" => {
            let y = params.get("y").and_then(|v| v.as_f64()).ok_or("missing y")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            if !a.has_page() {
                return Err("no page loaded".to_string());
            }
            let updated = a.scroll(y);
            let progress = a.reader().map(|c| c.progress());
            Ok(json!({
                "updated": updated.is_some(),
                "scroll_y": a.scroll_metrics().map(|m| m.scroll_y),
                "percent_complete": progress.map(|p| p.percent_complete),
                "label": progress.map(|p| p.label()),
            }))
        }
        "page.key" => {
            let event: KeyEvent = serde_json::from_value(params.clone())
                .map_err(|e| format!("invalid key event: {}", e))?;
            let handled = with_reader(app, |c| c.handle_key(&event))?;
            Ok(json!({"handled": handled}))
        }
        "page.tick" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let ran = a.tick();
            Ok(json!({"ran": ran}))
        }
        "page.view" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let view = a.page_view().ok_or("no page loaded")?;
            serde_json::to_value(view).map_err(|e| e.to_string())
        }

        // ─── window.ReaderMode ───
        "reader.enable" => {
            let enabled = with_reader(app, |c| {
                c.enable();
                c.is_enabled()
            })?;
            Ok(json!({"enabled": enabled}))
        }
        "reader.disable" => {
            let enabled = with_reader(app, |c| {
                c.disable();
                c.is_enabled()
            })?;
            Ok(json!({"enabled": enabled}))
        }
        "reader.toggle" => {
            let enabled = with_reader(app, |c| {
                c.toggle();
                c.is_enabled()
            })?;
            Ok(json!({"enabled": enabled}))
        }
        "reader.is_enabled" => {
            let enabled = with_reader(app, |c| c.is_enabled())?;
            Ok(json!({"enabled": enabled}))
        }

        // ─── Reader controls ───
        "reader.font" => {
            let direction: FontSizeDirection = params
                .get("direction")
                .and_then(|v| v.as_str())
                .ok_or("missing direction")?
                .parse()?;
            let size = with_reader(app, |c| c.adjust_font_size(direction))?;
            Ok(json!({"font_size": size.percent()}))
        }
        "reader.state" => with_reader(app, |c| reader_state(c)),
        "reader.shortcuts" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let entries: Vec<Value> = a
                .shortcut_manager
                .help_entries()
                .iter()
                .map(|e| json!({
                    "keys": e.keys,
                    "html": ShortcutManager::format_keys(e.keys),
                    "description": e.description,
                }))
                .collect();
            Ok(json!({"category": "Reading", "items": entries}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
