//! Settings loading with environment variable overrides.
//!
//! A missing file yields compiled defaults; invalid JSON is an error.
//! Env overrides use strict parsing and silently fall back to the
//! file/default value when a variable does not parse.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::Result;
use crate::EvhubSettings;

/// Resolve the path to the settings file (`~/.evhub/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".evhub").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<EvhubSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
pub fn load_settings_from_path(path: &Path) -> Result<EvhubSettings> {
    let mut settings = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    } else {
        debug!(?path, "settings file not found, using defaults");
        EvhubSettings::default()
    };
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Apply `EVHUB_*` environment variable overrides.
pub fn apply_env_overrides(settings: &mut EvhubSettings) {
    if let Some(v) = read_env_string("EVHUB_DATA_DIR") {
        settings.data_dir = PathBuf::from(v);
    }
    if let Some(v) = read_env_string("EVHUB_SESSION_FILE") {
        settings.session_file = v;
    }
    if let Some(v) = read_env_u64("EVHUB_LOGIN_LATENCY_MS", 0, 60_000) {
        settings.login_latency_ms = v;
    }
    if let Some(v) = read_env_bool("EVHUB_SEED_DEMO") {
        settings.seed_demo_data = v;
    }
    if let Some(v) = read_env_bool("EVHUB_LOG_JSON") {
        settings.log_json = v;
    }
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_u64(name: &str, min: u64, max: u64) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.parse::<u64>() {
        Ok(value) if (min..=max).contains(&value) => Some(value),
        Ok(value) => {
            warn!(name, value, min, max, "env override out of range, ignoring");
            None
        }
        Err(_) => {
            warn!(name, value = %raw, "env override is not a number, ignoring");
            None
        }
    }
}

fn read_env_bool(name: &str) -> Option<bool> {
    let raw = std::env::var(name).ok()?;
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
            warn!(name, value = %raw, "env override is not a boolean, ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings_file(contents: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("evhub-settings-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("evhub-no-such-settings.json");
        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.session_file, "session.json");
    }

    #[test]
    fn file_values_override_defaults() {
        let path = temp_settings_file(r#"{"seed_demo_data": false, "login_latency_ms": 250}"#);
        let settings = load_settings_from_path(&path).unwrap();
        assert!(!settings.seed_demo_data);
        assert_eq!(settings.login_latency_ms, 250);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let path = temp_settings_file("{nope");
        assert!(load_settings_from_path(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn env_bool_parsing() {
        std::env::set_var("EVHUB_TEST_BOOL", "yes");
        assert_eq!(read_env_bool("EVHUB_TEST_BOOL"), Some(true));
        std::env::set_var("EVHUB_TEST_BOOL", "off");
        assert_eq!(read_env_bool("EVHUB_TEST_BOOL"), Some(false));
        std::env::set_var("EVHUB_TEST_BOOL", "maybe");
        assert_eq!(read_env_bool("EVHUB_TEST_BOOL"), None);
        std::env::remove_var("EVHUB_TEST_BOOL");
    }

    #[test]
    fn env_u64_range_check() {
        std::env::set_var("EVHUB_TEST_U64", "500");
        assert_eq!(read_env_u64("EVHUB_TEST_U64", 0, 1000), Some(500));
        assert_eq!(read_env_u64("EVHUB_TEST_U64", 0, 100), None);
        std::env::set_var("EVHUB_TEST_U64", "not-a-number");
        assert_eq!(read_env_u64("EVHUB_TEST_U64", 0, 1000), None);
        std::env::remove_var("EVHUB_TEST_U64");
    }
}
