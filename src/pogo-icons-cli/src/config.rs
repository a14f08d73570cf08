//! Configuration management for the pogo-icons CLI

use anyhow::{Context, Result};
use pogo_icons::CommandTrimmer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::feed_source::DEFAULT_GAME_MASTER_URL;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Game master path or http(s) URL
    pub game_master: Option<String>,
    /// Form/evolution enum table (JSON)
    pub enums: Option<PathBuf>,
    /// Replacement for the built-in fallback table (TOML)
    pub fallbacks: Option<PathBuf>,
    pub trim_program: Option<String>,
    pub trim_args: Option<Vec<String>>,
}

impl Config {
    /// Get the path to the default config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("pogo-icons");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Explicit path if given, otherwise the default location
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    pub fn game_master_source(&self) -> &str {
        self.game_master
            .as_deref()
            .unwrap_or(DEFAULT_GAME_MASTER_URL)
    }

    /// Trim command, falling back to `convert -trim -fuzz 1%`
    pub fn trimmer(&self) -> CommandTrimmer {
        let default = CommandTrimmer::default();
        CommandTrimmer::new(
            self.trim_program.clone().unwrap_or(default.program),
            self.trim_args.clone().unwrap_or(default.args),
        )
    }
}
