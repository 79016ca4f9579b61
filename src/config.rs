use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub samplers: SamplersConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log file for this run, truncated at startup.
    pub log_file: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_file: PathBuf::from("tasktop.log"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SamplersConfig {
    pub tasklist_interval_ms: u64,
    pub load_interval_ms: u64,
    pub capacity_interval_ms: u64,
}

impl Default for SamplersConfig {
    fn default() -> Self {
        SamplersConfig {
            tasklist_interval_ms: 5000,
            load_interval_ms: 1000,
            capacity_interval_ms: 5000,
        }
    }
}

impl SamplersConfig {
    pub fn tasklist_interval(&self) -> Duration {
        Duration::from_millis(self.tasklist_interval_ms)
    }

    pub fn load_interval(&self) -> Duration {
        Duration::from_millis(self.load_interval_ms)
    }

    pub fn capacity_interval(&self) -> Duration {
        Duration::from_millis(self.capacity_interval_ms)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tasktop").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
