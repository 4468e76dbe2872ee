use std::fs;
use std::path::Path;

use log::{error, trace};

use crate::error::FileError;

#[macro_export]
macro_rules! trace_fn {
    ($fn_name:expr, $($arg:tt)+) => {
        {
            use colored::Colorize;
            log::trace!("[{}] {}", $fn_name.to_string().bright_blue().bold(), format!($($arg)+))
        }
    };
}

#[macro_export]
macro_rules! debug_fn {
    ($fn_name:expr, $($arg:tt)+) => {
        {
            use colored::Colorize;
            log::debug!("[{}] {}", $fn_name.to_string().cyan().bold(), format!($($arg)+))
        }
    };
}

#[macro_export]
macro_rules! info_fn {
    ($fn_name:expr, $($arg:tt)+) => {
        {
            use colored::Colorize;
            log::info!("[{}] {}", $fn_name.to_string().green().bold(), format!($($arg)+))
        }
    };
}

#[macro_export]
macro_rules! warn_fn {
    ($fn_name:expr, $($arg:tt)+) => {
        {
            use colored::Colorize;
            log::warn!("[{}] {}", $fn_name.to_string().yellow().bold(), format!($($arg)+))
        }
    };
}

/// Reads the whole content of a regular file.
///
/// Missing paths and directories are reported as distinct [`FileError`] variants so
/// callers can tell "nothing to read" apart from an I/O failure.
pub fn read_file_bytes(file_path: &Path) -> Result<Vec<u8>, FileError> {
    if !file_path.exists() {
        return Err(FileError::NotFound(file_path.to_path_buf()));
    }

    if !file_path.is_file() {
        return Err(FileError::NotAFile(file_path.to_path_buf()));
    }

    let data = fs::read(file_path).map_err(|source| {
        error!("Failed to read file: {:?}", file_path);
        FileError::ReadError {
            path: file_path.to_path_buf(),
            source,
        }
    })?;

    trace!("Read {} bytes from {:?}", data.len(), file_path);
    Ok(data)
}

/// Like [`read_file_bytes`], but a missing file yields `None` instead of an error.
pub fn read_optional_file(file_path: &Path) -> Result<Option<Vec<u8>>, FileError> {
    match read_file_bytes(file_path) {
        Ok(data) => Ok(Some(data)),
        Err(FileError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Overwrites `file_path` with `contents`, creating parent directories as needed.
pub fn write_file(file_path: &Path, contents: &[u8]) -> Result<(), FileError> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| FileError::WriteError {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    fs::write(file_path, contents).map_err(|source| {
        error!("Failed to write file: {:?}", file_path);
        FileError::WriteError {
            path: file_path.to_path_buf(),
            source,
        }
    })?;

    trace!("Wrote {} bytes to {:?}", contents.len(), file_path);
    Ok(())
}

/// Formats a file size in bytes to a human-readable string (B, KB, MB, or GB).
///
/// # Examples
///
/// ```
/// use cubase_project_manager::utils::format_file_size;
///
/// assert_eq!(format_file_size(1023), "1023 B");
/// assert_eq!(format_file_size(1024), "1.00 KB");
/// assert_eq!(format_file_size(1_048_576), "1.00 MB");
/// assert_eq!(format_file_size(1_073_741_824), "1.00 GB");
/// ```
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if size < KB {
        format!("{} B", size)
    } else if size < MB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else if size < GB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else {
        format!("{:.2} GB", size as f64 / GB as f64)
    }
}
