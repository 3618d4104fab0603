//! Config loading/saving for JSON files, plus the mirror's own settings.

use crate::error::{MirrorError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Env var that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "MOOD_MIRROR_CONFIG";

/// Generic load for any Serde config type with a `Default` implementation.
/// Falls back to `T::default()` if the file is missing or unparsable.
pub fn load_json_config<T: DeserializeOwned + Default>(path: &Path, label: &str) -> T {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<T>(&content) {
            Ok(config) => {
                tracing::info!(label, path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(
                    label,
                    path = %path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                T::default()
            }
        },
        Err(_) => {
            tracing::info!(label, path = %path.display(), "no config file, using defaults");
            T::default()
        }
    }
}

/// Generic save for any Serde config type.
pub fn save_json_config<T: Serialize>(path: &Path, config: &T, label: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    tracing::info!(label, path = %path.display(), "saved config");
    Ok(())
}

/// `$MOOD_MIRROR_CONFIG`, else `<config dir>/mood-mirror/config.json`.
pub fn default_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    dirs_next::config_dir()
        .map(|dir| dir.join("mood-mirror").join("config.json"))
        .ok_or_else(|| MirrorError::Config("no config directory on this platform".into()))
}

// ── Mirror Config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MirrorConfig {
    /// Time between simulated readings.
    pub sample_interval_ms: u64,
    /// Samples kept for the history chart.
    pub history_capacity: usize,
    /// Overlay redraw rate.
    pub refresh_rate_hz: u32,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
    pub camera: CameraConfig,
    pub demo: DemoConfig,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 2000,
            history_capacity: 20,
            refresh_rate_hz: 60,
            seed: None,
            camera: CameraConfig::default(),
            demo: DemoConfig::default(),
        }
    }
}

impl MirrorConfig {
    /// Clamp out-of-range values instead of rejecting the file.
    pub fn normalized(mut self) -> Self {
        if self.sample_interval_ms == 0 {
            self.sample_interval_ms = Self::default().sample_interval_ms;
        }
        self.history_capacity = self.history_capacity.max(1);
        self.refresh_rate_hz = self.refresh_rate_hz.clamp(1, 240);
        self
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub width: u32,
    pub height: u32,
    pub tracks: usize,
    /// Simulate the user refusing camera access.
    pub deny_permission: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            tracks: 1,
            deny_permission: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    pub duration_secs: u64,
    /// Where PNG frames and JSON state snapshots go; nothing is written when unset.
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            duration_secs: 20,
            snapshot_dir: None,
        }
    }
}
