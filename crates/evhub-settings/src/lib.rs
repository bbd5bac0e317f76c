//! # evhub-settings
//!
//! Configuration for the event hub, loaded from three layers
//! (in priority order):
//! 1. **Compiled defaults** — [`EvhubSettings::default()`]
//! 2. **User file** — `~/.evhub/settings.json`
//! 3. **Environment variables** — `EVHUB_*` overrides (highest priority)

pub mod errors;
pub mod loader;

pub use errors::{Result, SettingsError};
pub use loader::{load_settings, load_settings_from_path, settings_path};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvhubSettings {
    /// Root directory for durable state.
    pub data_dir: PathBuf,
    /// File name of the session slot inside `data_dir`.
    pub session_file: String,
    /// Simulated credential-lookup latency, in milliseconds.
    pub login_latency_ms: u64,
    /// Whether the event store starts with the demo fixtures.
    pub seed_demo_data: bool,
    /// Emit logs as JSON instead of human-readable lines.
    pub log_json: bool,
}

impl Default for EvhubSettings {
    fn default() -> Self {
        Self {
            data_dir: home_dir().join(".evhub"),
            session_file: "session.json".to_string(),
            login_latency_ms: 1000,
            seed_demo_data: true,
            log_json: false,
        }
    }
}

impl EvhubSettings {
    /// Full path of the durable session slot.
    pub fn session_slot_path(&self) -> PathBuf {
        self.data_dir.join(&self.session_file)
    }
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}
