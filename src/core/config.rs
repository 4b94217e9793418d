//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

use crate::core::Home;

/// Larder configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External program run for each notification; receives the title and
    /// body as its final two arguments (e.g. "notify-send")
    pub notify_command: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(home: Option<&Home>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/larder/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Household config (.larder/config.yaml)
        if let Some(home) = home {
            let home_config_path = home.larder_dir().join("config.yaml");
            if home_config_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&home_config_path) {
                    if let Ok(home_config) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(home_config);
                    }
                }
            }
        }

        // 4. Environment variables
        if let Ok(command) = std::env::var("LARDER_NOTIFY_COMMAND") {
            config.notify_command = Some(command);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "larder")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.notify_command.is_some() {
            self.notify_command = other.notify_command;
        }
    }
}
