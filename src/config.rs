//! Client configuration.
//!
//! Sources, highest precedence first: command-line flags, environment
//! (`SAMVIDHAN_API_URL`, `SAMVIDHAN_LOG`), the YAML config file, built-in
//! defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const API_URL_ENV: &str = "SAMVIDHAN_API_URL";
pub const LOG_ENV: &str = "SAMVIDHAN_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("in", "samvidhan", "samvidhan")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.yaml"))
}

pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.data_dir().join("samvidhan.log"))
}

impl Config {
    /// Parse a config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load from an explicit path (which must exist) or from the default
    /// location (which may not), then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(p) if !p.exists() => {
                return Err(ConfigError::NotFound(p.display().to_string()));
            }
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(level) = lookup(LOG_ENV).filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(default_log_path)
    }
}
