use serde::de::Error;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Path is not a file: {0}")]
    NotAFile(PathBuf),

    #[error("Failed to read {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path:?}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("File error: {0}")]
    FileError(#[from] FileError),

    #[error("Failed to parse catalog {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Pattern error: {0}")]
    PatternError(#[from] PatternError),
}

#[derive(Error, Debug)]
pub enum TagStoreError {
    #[error("File error: {0}")]
    FileError(#[from] FileError),

    #[error("Failed to parse tag store {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid count for tag '{tag}' in {path:?}: expected a positive integer")]
    InvalidCount { path: PathBuf, tag: String },

    #[error("Failed to serialize tag store: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("File error: {0}")]
    FileError(#[from] FileError),

    #[error("Pattern error: {0}")]
    PatternError(#[from] PatternError),

    #[error("Worker pool error: {0}")]
    WorkerError(String),
}

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("File error: {0}")]
    FileError(#[from] FileError),

    #[error("Failed to parse catalog {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog {0:?} is not a JSON array")]
    NotAnArray(PathBuf),

    #[error("Unsupported catalog entry at index {index}: {value}")]
    UnsupportedEntry { index: usize, value: String },

    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug)]
pub enum ConfigError {
    IoError(io::Error),
    ParseError(toml::de::Error),
    SerializeError(toml::ser::Error),
    HomeDirError,
    InvalidPath(String),
    InvalidValue(String),
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error in config: {}", e),
            ConfigError::ParseError(e) => write!(f, "Failed to parse config file: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Failed to serialize config: {}", e),
            ConfigError::HomeDirError => write!(f, "Failed to get home directory"),
            ConfigError::InvalidPath(s) => write!(f, "Invalid path in config: {}", s),
            ConfigError::InvalidValue(s) => write!(f, "Invalid configuration value: {}", s),
        }
    }
}

impl Clone for ConfigError {
    fn clone(&self) -> Self {
        match self {
            ConfigError::IoError(e) => {
                ConfigError::IoError(io::Error::new(e.kind(), e.to_string()))
            }
            ConfigError::ParseError(e) => {
                ConfigError::ParseError(toml::de::Error::custom(e.to_string()))
            }
            ConfigError::SerializeError(e) => {
                ConfigError::SerializeError(<toml::ser::Error as serde::ser::Error>::custom(
                    e.to_string(),
                ))
            }
            ConfigError::HomeDirError => ConfigError::HomeDirError,
            ConfigError::InvalidPath(s) => ConfigError::InvalidPath(s.clone()),
            ConfigError::InvalidValue(s) => ConfigError::InvalidValue(s.clone()),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(error: io::Error) -> Self {
        ConfigError::IoError(error)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        ConfigError::ParseError(error)
    }
}
