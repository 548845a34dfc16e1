//! Configuration management
//!
//! Manages where learned patterns are stored, which classification rule
//! table is used and whether demo patterns are seeded.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::classifier::RuleSet;

/// File name of the pattern store inside the config directory
pub const PATTERN_FILE_NAME: &str = "patterns.json";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Pattern persistence settings
    #[serde(default)]
    pub store: StoreConfig,
    /// Classification rule settings
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Learning behaviour
    #[serde(default)]
    pub learning: LearningConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Pattern file; defaults to `<config dir>/patterns.json`
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Write patterns to disk at all
    #[serde(default = "default_true")]
    pub persist: bool,
}

fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            persist: true,
        }
    }
}

impl StoreConfig {
    /// Effective pattern file path, `None` when persistence is off
    pub fn resolved_path(&self) -> Result<Option<PathBuf>> {
        if !self.persist {
            return Ok(None);
        }
        match &self.path {
            Some(path) => Ok(Some(path.clone())),
            None => default_pattern_path().map(Some),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// TOML rule table; the built-in table is used when unset
    #[serde(default)]
    pub rules_path: Option<PathBuf>,
}

impl ClassifierConfig {
    pub fn load_rules(&self) -> Result<RuleSet> {
        match &self.rules_path {
            Some(path) => RuleSet::from_file(path),
            None => Ok(RuleSet::builtin()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningConfig {
    /// Seed a few successful demo patterns on startup
    #[serde(default = "default_true")]
    pub seed_demo_patterns: bool,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            seed_demo_patterns: true,
        }
    }
}

impl Config {
    /// Load configuration from the default file, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load configuration from a specific file, or defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }
}

/// Per-user configuration directory
pub fn config_dir() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "reality-agent", "reality-agent")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().to_path_buf())
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Default location of the pattern store
pub fn default_pattern_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(PATTERN_FILE_NAME))
}
