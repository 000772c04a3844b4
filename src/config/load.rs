//! The config loading module for parsec.
//!
//! Resolves and reads `parsec.toml` into the [Config] struct. A missing or malformed file is
//! never fatal: parsec falls back to its internal defaults.

use crate::config::{General, Keys};
use crate::utils::get_home;

use serde::Deserialize;

use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration struct for parsec, deserialized directly from the toml file.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Config {
    general: General,
    keys: Keys,
}

impl Config {
    /// Loads the configuration from [Config::default_path].
    ///
    /// Called by the entry point before the terminal is set up.
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        Self::load_from(&path)
    }

    /// Loads the configuration from `path`, or the defaults if it cannot be read or parsed.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error parsing config: {}", e);
                    log::warn!("invalid config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("cannot read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the default configuration file path.
    /// Checks the PARSEC_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/parsec/parsec.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("PARSEC_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("parsec/parsec.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/parsec/parsec.toml");
        }
        PathBuf::from("parsec.toml")
    }
}
