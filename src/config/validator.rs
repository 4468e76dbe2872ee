use crate::config::Config;
use crate::error::ConfigError;
use std::path::PathBuf;

/// Log levels accepted in the config file
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl Config {
    /// Validates the configuration for logical constraints
    ///
    /// Returns warnings for problems that do not prevent running.
    pub fn validate(&self) -> Result<Vec<String>, ConfigError> {
        let mut warnings = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidValue(format!(
                "Invalid log level '{}'. Must be one of: {:?}",
                self.log_level, VALID_LOG_LEVELS
            )));
        }

        if self.top_tags == 0 {
            return Err(ConfigError::InvalidValue(
                "top_tags must be at least 1".to_string(),
            ));
        }

        if self.project_paths.is_empty() {
            warnings.push("No project paths configured".to_string());
        }

        for path in &self.project_paths {
            let path_buf = PathBuf::from(path);
            if !path_buf.exists() {
                warnings.push(format!("Path does not exist: {}", path));
            } else if !path_buf.is_dir() {
                return Err(ConfigError::InvalidPath(format!(
                    "Project path is not a directory: {}",
                    path
                )));
            }
        }

        for (label, path) in [("catalog_path", &self.catalog_path), ("tags_path", &self.tags_path)] {
            if let Some(path) = path {
                if PathBuf::from(path).is_dir() {
                    return Err(ConfigError::InvalidPath(format!(
                        "{} points to a directory: {}",
                        label, path
                    )));
                }
            }
        }

        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_invalid_log_level() {
        let config = Config {
            log_level: "verbose".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_zero_top_tags() {
        let config = Config {
            top_tags: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_project_path_is_warning() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            project_paths: vec![
                temp_dir.path().to_string_lossy().to_string(),
                temp_dir.path().join("gone").to_string_lossy().to_string(),
            ],
            ..Config::default()
        };

        let warnings = config.validate().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Path does not exist"));
    }

    #[test]
    fn test_catalog_path_must_not_be_directory() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            catalog_path: Some(temp_dir.path().to_string_lossy().to_string()),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPath(_))));
    }
}
