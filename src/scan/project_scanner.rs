use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::{trace_fn, warn_fn};

/// Extension of Cubase project files
pub const PROJECT_EXTENSION: &str = "cpr";

/// Folder Cubase writes periodic auto-saves into
pub const AUTO_SAVE_DIR: &str = "Auto Saves";

/// Scanner for finding Cubase project files in directories
#[derive(Debug, Default, Clone)]
pub struct ProjectPathScanner;

impl ProjectPathScanner {
    pub fn new() -> Self {
        Self
    }

    fn is_project_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case(PROJECT_EXTENSION))
    }

    fn is_auto_save(dir: &Path, path: &Path) -> bool {
        // Only components below the scanned root count, so scanning an
        // "Auto Saves" folder directly still works.
        path.strip_prefix(dir)
            .unwrap_or(path)
            .components()
            .any(|c| c.as_os_str().to_string_lossy().eq_ignore_ascii_case(AUTO_SAVE_DIR))
    }

    /// Scan a directory for Cubase project files
    pub fn scan_directory(&self, dir: &Path) -> Vec<PathBuf> {
        let mut project_paths = HashSet::new();

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn_fn!("scan_directory", "Skipping unreadable entry: {}", err);
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !Self::is_project_file(path) {
                continue;
            }

            if Self::is_auto_save(dir, path) {
                trace_fn!("scan_directory", "Skipping auto-save {}", path.display());
                continue;
            }

            project_paths.insert(path.to_path_buf());
        }

        let mut paths: Vec<PathBuf> = project_paths.into_iter().collect();
        paths.sort();
        paths
    }

    /// Scan multiple directories for Cubase project files
    pub fn scan_directories(&self, dirs: &[PathBuf]) -> Vec<PathBuf> {
        let mut all_paths = HashSet::new();

        for dir in dirs {
            all_paths.extend(self.scan_directory(dir));
        }

        let mut paths: Vec<PathBuf> = all_paths.into_iter().collect();
        paths.sort();
        paths
    }
}
