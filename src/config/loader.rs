use crate::config::{defaults, Config};
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Maximum depth to traverse when searching for config file relative to executable
pub const MAX_DIRECTORY_TRAVERSAL_DEPTH: usize = 5;

impl Config {
    /// Creates a new Config instance by loading from the config file
    pub fn new() -> Result<Self, ConfigError> {
        let config_path = find_config_file()?;
        Self::load_from(&config_path)
    }

    /// Loads, expands and validates the config file at `config_path`
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        let config_str = std::fs::read_to_string(config_path).map_err(|e| {
            ConfigError::IoError(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                ),
            ))
        })?;

        let mut config: Config = toml::from_str(&config_str).map_err(ConfigError::ParseError)?;

        // Process {USER_HOME} placeholders
        process_user_home_placeholders(&mut config)?;

        // Validate the configuration and collect warnings
        let warnings = config.validate()?;

        // Logging is not set up yet at this point
        for warning in warnings {
            eprintln!("Config warning: {}", warning);
        }

        Ok(config)
    }
}

/// Processes {USER_HOME} placeholders in all configuration paths
fn process_user_home_placeholders(config: &mut Config) -> Result<(), ConfigError> {
    let home_dir = dirs::home_dir().ok_or(ConfigError::HomeDirError)?;
    let home_dir_str = home_dir.to_str().ok_or_else(|| {
        ConfigError::InvalidPath("Home directory path is not valid UTF-8".into())
    })?;

    config.project_paths = config
        .project_paths
        .iter()
        .map(|path| path.replace("{USER_HOME}", home_dir_str))
        .collect();
    config.catalog_path = config
        .catalog_path
        .as_ref()
        .map(|path| path.replace("{USER_HOME}", home_dir_str));
    config.tags_path = config
        .tags_path
        .as_ref()
        .map(|path| path.replace("{USER_HOME}", home_dir_str));

    Ok(())
}

/// Finds the configuration file using the search strategy:
/// 1. Environment variable CUBASE_PROJECT_MANAGER_CONFIG
/// 2. User config directory
/// 3. Relative to executable (for development/portable use)
/// 4. Creates default config in the user config directory if none found
pub fn find_config_file() -> Result<PathBuf, ConfigError> {
    if let Ok(config_path) = std::env::var("CUBASE_PROJECT_MANAGER_CONFIG") {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::InvalidPath("Could not get config directory".into()))?;
    let app_config_dir = config_dir.join(defaults::APP_DIR_NAME);
    let user_config_path = app_config_dir.join("config.toml");

    if user_config_path.exists() {
        return Ok(user_config_path);
    }

    let mut dir = std::env::current_exe().map_err(ConfigError::IoError)?;
    dir.pop(); // Remove the executable name to get the directory

    for _ in 0..MAX_DIRECTORY_TRAVERSAL_DEPTH {
        let config_path = dir.join("config.toml");
        if config_path.exists() {
            return Ok(config_path);
        }

        if !dir.pop() {
            break;
        }
    }

    std::fs::create_dir_all(&app_config_dir).map_err(ConfigError::IoError)?;
    std::fs::write(&user_config_path, defaults::generate_default_config())
        .map_err(ConfigError::IoError)?;

    Ok(user_config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_expands_user_home() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
project_paths = ["{USER_HOME}/Cubase"]
catalog_path = "{USER_HOME}/vsti_list.json"
log_level = "debug"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        let home = dirs::home_dir().unwrap();

        assert_eq!(
            config.project_paths,
            vec![format!("{}/Cubase", home.display())]
        );
        assert_eq!(
            config.catalog_path,
            Some(format!("{}/vsti_list.json", home.display()))
        );
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.top_tags, defaults::DEFAULT_TOP_TAGS);
    }

    #[test]
    fn test_generated_default_parses() {
        let config: Config = toml::from_str(&defaults::generate_default_config()).unwrap();
        assert!(config.project_paths.is_empty());
        assert_eq!(config.log_level, defaults::DEFAULT_LOG_LEVEL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "project_paths = [").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
