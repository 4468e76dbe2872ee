use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::MigrationError;
use crate::models::CatalogEntry;
use crate::utils::{read_file_bytes, write_file};
use crate::{debug_fn, info_fn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The file already holds records (or nothing at all); it was left untouched.
    AlreadyMigrated,
    /// The file was rewritten; the original content is at `backup`.
    Migrated { backup: PathBuf, entries: usize },
}

/// Path of the backup written next to `catalog_path`.
pub fn backup_path(catalog_path: &Path) -> PathBuf {
    let mut name = catalog_path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

/// Rewrites a bare-name catalog as a list of `{name}` records.
///
/// The original file is copied to `<path>.bak` before it is overwritten. Running
/// this on a catalog whose first entry is already a record performs no write.
pub fn migrate_catalog_file(catalog_path: &Path) -> Result<MigrationOutcome, MigrationError> {
    let data = read_file_bytes(catalog_path)?;
    let value: Value = serde_json::from_slice(&data).map_err(|source| MigrationError::Parse {
        path: catalog_path.to_path_buf(),
        source,
    })?;

    let Value::Array(items) = value else {
        return Err(MigrationError::NotAnArray(catalog_path.to_path_buf()));
    };

    match items.first() {
        None => {
            debug_fn!("migrate_catalog_file", "Catalog is empty, nothing to migrate");
            return Ok(MigrationOutcome::AlreadyMigrated);
        }
        Some(Value::Object(_)) => {
            info_fn!(
                "migrate_catalog_file",
                "{} is already in record format",
                catalog_path.display()
            );
            return Ok(MigrationOutcome::AlreadyMigrated);
        }
        Some(_) => {}
    }

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let entry: CatalogEntry = serde_json::from_value(item.clone()).map_err(|_| {
            MigrationError::UnsupportedEntry {
                index,
                value: item.to_string(),
            }
        })?;
        records.push(CatalogEntry::from(&entry.into_record()));
    }

    let backup = backup_path(catalog_path);
    write_file(&backup, &data)?;

    let json = serde_json::to_string_pretty(&records).map_err(MigrationError::Serialize)?;
    write_file(catalog_path, json.as_bytes())?;

    info_fn!(
        "migrate_catalog_file",
        "Migrated {} entries, original saved as {}",
        records.len(),
        backup.display()
    );

    Ok(MigrationOutcome::Migrated {
        backup,
        entries: records.len(),
    })
}
