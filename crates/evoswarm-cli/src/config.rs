//! Configuration management for evoswarm CLI.

use anyhow::{Context, Result};
use evoswarm::prelude::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "evoswarm.toml";

/// evoswarm project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub canvas: CanvasConfig,
}

/// Canvas the headless driver simulates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
}

fn default_width() -> f64 { 800.0 }
fn default_height() -> f64 { 600.0 }

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Config {
    /// Load config from evoswarm.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        if let Some(path) = find_config_file() {
            Self::load_from(&path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Find evoswarm.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
