//! Configuration management for ragchat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{RagchatError, Result};
use crate::storage::SessionStore;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound accepted for `history.max_sessions`
const MAX_SESSIONS_LIMIT: usize = 10_000;

/// Main configuration structure for ragchat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chat history persistence settings
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Chat history configuration
///
/// Controls where sessions are stored and how many are retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Whether sessions are persisted at all
    #[serde(default = "default_history_enabled")]
    pub enabled: bool,

    /// Directory holding one JSON record per session
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Maximum number of sessions kept; older ones are evicted on save
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_history_enabled() -> bool {
    true
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("./chat_history")
}

fn default_max_sessions() -> usize {
    50
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_history_enabled(),
            storage_dir: default_storage_dir(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl HistoryConfig {
    /// Build the session store, or `None` when history is disabled
    ///
    /// Callers skip save, list and delete entirely when this returns `None`.
    pub fn store(&self) -> Option<SessionStore> {
        self.enabled.then(|| SessionStore::from_config(self))
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RagchatError::Config(format!("Failed to read config file: {}", e)))?;
        let config = serde_yaml::from_str(&contents)
            .map_err(RagchatError::from)
            .context("Failed to parse config")?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(enabled) = std::env::var("ENABLE_CHAT_HISTORY") {
            self.history.enabled = enabled.trim().eq_ignore_ascii_case("true");
            tracing::debug!(enabled = self.history.enabled, "Env override: ENABLE_CHAT_HISTORY");
        }

        if let Ok(max) = std::env::var("MAX_CHAT_HISTORY") {
            if let Ok(value) = max.trim().parse() {
                self.history.max_sessions = value;
            } else {
                tracing::warn!("Invalid MAX_CHAT_HISTORY: {}", max);
            }
        }

        if let Ok(dir) = std::env::var("CHAT_STORAGE_DIR") {
            tracing::debug!(storage_dir = %dir, "Env override: CHAT_STORAGE_DIR");
            self.history.storage_dir = PathBuf::from(dir);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(dir) = &cli.storage_dir {
            tracing::info!("Using history directory override from CLI: {}", dir.display());
            self.history.storage_dir = dir.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.history.storage_dir.as_os_str().is_empty() {
            return Err(
                RagchatError::Config("history.storage_dir cannot be empty".to_string()).into(),
            );
        }

        if self.history.max_sessions == 0 {
            return Err(RagchatError::Config(
                "history.max_sessions must be greater than 0".to_string(),
            )
            .into());
        }

        if self.history.max_sessions > MAX_SESSIONS_LIMIT {
            return Err(RagchatError::Config(format!(
                "history.max_sessions must be less than or equal to {}",
                MAX_SESSIONS_LIMIT
            ))
            .into());
        }

        Ok(())
    }
}
