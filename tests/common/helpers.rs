//! Helper functions for tests

use cubase_project_manager::catalog::{KnownInstrumentCatalog, CATALOG_FILE_NAME};
use cubase_project_manager::models::InstrumentRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `json` as the catalog file inside `dir`
pub fn write_catalog_json(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join(CATALOG_FILE_NAME);
    fs::write(&path, json).unwrap();
    path
}

/// Writes a record-form catalog inside `dir` and loads it back
pub fn catalog_with(dir: &Path, records: &[(&str, Option<&str>)]) -> KnownInstrumentCatalog {
    let path = dir.join(CATALOG_FILE_NAME);
    let records: Vec<InstrumentRecord> = records
        .iter()
        .map(|(name, editor)| match editor {
            Some(editor) => InstrumentRecord::with_editor(*name, *editor),
            None => InstrumentRecord::new(*name),
        })
        .collect();
    KnownInstrumentCatalog::from_records(&path, records)
        .save()
        .unwrap();
    KnownInstrumentCatalog::load(path).unwrap()
}

/// Writes a project file, creating parent folders as needed
pub fn write_project(dir: &Path, relative: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, bytes).unwrap();
    path
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
