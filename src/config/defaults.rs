use crate::error::ConfigError;
use std::path::PathBuf;

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default number of popular tags suggested
pub const DEFAULT_TOP_TAGS: usize = 5;

/// Folder created under the user data directory
pub const APP_DIR_NAME: &str = "CubaseProjectManager";

/// Generates a default configuration file content
pub fn generate_default_config() -> String {
    format!(
        r#"# config.toml

project_paths = [
    # put your Cubase project folders here
]

# use {{USER_HOME}} as a shortcut to your user folder

# Known instrument catalog and tag counts
# If not specified or empty, they live in the user's data directory
# catalog_path = ''
# tags_path = ''

# Logging configuration
# Options: error, warn, info, debug, trace
log_level = "{}"

# Number of popular tags suggested
top_tags = {}
"#,
        DEFAULT_LOG_LEVEL, DEFAULT_TOP_TAGS
    )
}

/// Location of `file_name` inside the application data directory
pub fn default_data_file(file_name: &str) -> Result<PathBuf, ConfigError> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::InvalidPath("Could not get data directory".into()))?;
    Ok(data_dir.join(APP_DIR_NAME).join(file_name))
}

/// Default value functions for serde deserialization

pub fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

pub fn default_top_tags() -> usize {
    DEFAULT_TOP_TAGS
}
