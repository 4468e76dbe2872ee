pub mod defaults;
pub mod loader;
pub mod validator;

use crate::error::ConfigError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::{DEFAULT_LOG_LEVEL, DEFAULT_TOP_TAGS};
pub use loader::{find_config_file, MAX_DIRECTORY_TRAVERSAL_DEPTH};

/// Configuration for the Cubase Project Manager
///
/// # Example Configuration File
/// ```toml
/// # Folders searched for .cpr projects
/// project_paths = [
///     "{USER_HOME}/Documents/Cubase Projects"
/// ]
///
/// # Known instrument catalog (optional, defaults to the user data directory)
/// # catalog_path = "{USER_HOME}/.local/share/CubaseProjectManager/vsti_list.json"
///
/// # Tag usage counts (optional, defaults to the user data directory)
/// # tags_path = "{USER_HOME}/.local/share/CubaseProjectManager/tags.json"
///
/// # Logging level: error, warn, info, debug, trace
/// log_level = "info"
///
/// # Number of popular tags suggested
/// top_tags = 5
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Folders searched for Cubase projects
    #[serde(default)]
    pub project_paths: Vec<String>,
    /// Known instrument catalog file
    #[serde(default)]
    pub catalog_path: Option<String>,
    /// Tag usage store file
    #[serde(default)]
    pub tags_path: Option<String>,
    /// Logging level
    #[serde(default = "defaults::default_log_level")]
    pub log_level: String,
    /// Number of popular tags suggested
    #[serde(default = "defaults::default_top_tags")]
    pub top_tags: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_paths: Vec::new(),
            catalog_path: None,
            tags_path: None,
            log_level: defaults::default_log_level(),
            top_tags: defaults::default_top_tags(),
        }
    }
}

impl Config {
    /// Returns the log level with environment variable override support
    pub fn log_level(&self) -> String {
        std::env::var("CUBASE_PROJECT_MANAGER_LOG_LEVEL").unwrap_or_else(|_| self.log_level.clone())
    }

    /// Returns the catalog path with environment variable override support
    pub fn catalog_path(&self) -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var("CUBASE_PROJECT_MANAGER_CATALOG") {
            return Ok(PathBuf::from(path));
        }
        match &self.catalog_path {
            Some(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
            _ => defaults::default_data_file(crate::catalog::CATALOG_FILE_NAME),
        }
    }

    /// Returns the tag store path with environment variable override support
    pub fn tags_path(&self) -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var("CUBASE_PROJECT_MANAGER_TAGS") {
            return Ok(PathBuf::from(path));
        }
        match &self.tags_path {
            Some(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
            _ => defaults::default_data_file(crate::tags::TAGS_FILE_NAME),
        }
    }

    /// Project folders as paths
    pub fn project_dirs(&self) -> Vec<PathBuf> {
        self.project_paths.iter().map(PathBuf::from).collect()
    }

    /// Converts the configuration to TOML string format
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(ConfigError::SerializeError)
    }
}

/// Global configuration instance loaded lazily
pub static CONFIG: Lazy<Result<Config, ConfigError>> = Lazy::new(Config::new);
