//! yaub-reader RPC Server: JSON-RPC over stdin/stdout.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"reader.toggle", "params":{}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Timer tasks (transition cleanup, hint auto-hide, announcement removal) run
//! from a 25 ms interval between requests. Logs go to stderr.

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use yaub_reader::app::App;
use yaub_reader::platform;
use yaub_reader::rpc_handler::handle_method;

const TICK_INTERVAL: Duration = Duration::from_millis(25);

fn db_path() -> PathBuf {
    let dir = std::env::var("YAUB_READER_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| platform::get_data_dir());
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(error = %e, dir = %dir.display(), "cannot create data directory");
    }
    dir.join("preferences.db")
}

async fn respond(stdout: &mut io::Stdout, response: Value) -> io::Result<()> {
    stdout.write_all(format!("{}\n", response).as_bytes()).await?;
    stdout.flush().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let db_path = db_path();
    let config_path = std::env::var("YAUB_READER_CONFIG").ok();
    let app = Mutex::new(App::new(&db_path.to_string_lossy(), config_path));

    let mut stdout = io::stdout();
    respond(&mut stdout, json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")})).await?;

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = handle_method(&app, "page.tick", &json!({})) {
                    tracing::warn!(error = %e, "timer tick failed");
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }

                let req: Value = match serde_json::from_str(&line) {
                    Ok(v) => v,
                    Err(e) => {
                        respond(&mut stdout, json!({"id": null, "error": format!("parse error: {}", e)})).await?;
                        continue;
                    }
                };

                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(json!({}));
                tracing::debug!(%method, "rpc request");

                let response = match handle_method(&app, method, &params) {
                    Ok(val) => json!({"id": id, "result": val}),
                    Err(err) => json!({"id": id, "error": err}),
                };
                respond(&mut stdout, response).await?;
            }
        }
    }

    Ok(())
}
