// Platform paths for yaub-reader
// Config holds reader.json; data holds the preference database.
//
// Linux follows XDG, macOS uses Application Support, Windows uses %APPDATA%.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "yaub-reader";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Directory for `reader.json`.
///
/// - **Linux**: `$XDG_CONFIG_HOME/yaub-reader` or `~/.config/yaub-reader`
/// - **macOS**: `~/Library/Application Support/yaub-reader`
/// - **Windows**: `%APPDATA%/yaub-reader`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join(APP_DIR)
    }
    #[cfg(target_os = "windows")]
    {
        appdata_dir().join(APP_DIR)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR)
    }
}

/// Directory for the preference database.
///
/// - **Linux**: `$XDG_DATA_HOME/yaub-reader` or `~/.local/share/yaub-reader`
/// - **macOS**: `~/Library/Application Support/yaub-reader`
/// - **Windows**: `%APPDATA%/yaub-reader`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join(APP_DIR)
    }
    #[cfg(target_os = "windows")]
    {
        appdata_dir().join(APP_DIR)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir("XDG_DATA_HOME", &[".local", "share"]).join(APP_DIR)
    }
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => fallback.iter().fold(home_dir(), |path, part| path.join(part)),
    }
}

#[cfg(target_os = "windows")]
fn appdata_dir() -> PathBuf {
    env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join("AppData").join("Roaming"))
}
