//! Known instrument catalog.
//!
//! The catalog is a JSON array persisted on disk. Entries are either bare names
//! (legacy files) or `{name, editor}` records; both are normalized into
//! [`InstrumentRecord`] in memory. Every successful mutation rewrites the whole
//! file, and the original shape is kept on save so that loading and saving a
//! legacy catalog never migrates it behind the user's back (see [`migration`]).

pub mod matching;
pub mod migration;

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::CatalogError;
use crate::models::{CatalogEntry, CatalogFormat, InstrumentRecord};
use crate::utils::{read_optional_file, write_file};
use crate::{debug_fn, info_fn};

pub use matching::{EditorResolver, MatchTier};
pub use migration::{migrate_catalog_file, MigrationOutcome};

/// File name used for the catalog inside the application data directory.
pub const CATALOG_FILE_NAME: &str = "vsti_list.json";

/// Ordered list of known instruments backed by a JSON file.
#[derive(Debug, Clone)]
pub struct KnownInstrumentCatalog {
    path: PathBuf,
    records: Vec<InstrumentRecord>,
    format: CatalogFormat,
}

impl KnownInstrumentCatalog {
    /// Loads the catalog at `path`. A missing file is an empty catalog.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let Some(data) = read_optional_file(&path)? else {
            debug!("Catalog file {} not found, starting empty", path.display());
            return Ok(Self {
                path,
                records: Vec::new(),
                format: CatalogFormat::Legacy,
            });
        };

        let entries: Vec<CatalogEntry> =
            serde_json::from_slice(&data).map_err(|source| CatalogError::Parse {
                path: path.clone(),
                source,
            })?;

        let format = if entries.iter().any(CatalogEntry::is_record) {
            CatalogFormat::Records
        } else {
            CatalogFormat::Legacy
        };
        let records: Vec<InstrumentRecord> =
            entries.into_iter().map(CatalogEntry::into_record).collect();

        debug_fn!(
            "load",
            "Loaded {} instruments from {} ({})",
            records.len(),
            path.display(),
            format
        );

        Ok(Self {
            path,
            records,
            format,
        })
    }

    /// Builds a catalog from records; nothing is written until the first mutation.
    pub fn from_records(path: impl Into<PathBuf>, records: Vec<InstrumentRecord>) -> Self {
        Self {
            path: path.into(),
            records,
            format: CatalogFormat::Records,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[InstrumentRecord] {
        &self.records
    }

    pub fn format(&self) -> CatalogFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&InstrumentRecord> {
        self.position(name).map(|idx| &self.records[idx])
    }

    /// Names of all records, in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name == name)
    }

    /// Compiles the editor resolver for the current records.
    pub fn resolver(&self) -> Result<EditorResolver<'_>, CatalogError> {
        Ok(EditorResolver::new(&self.records)?)
    }

    /// Resolves a detected label to its editor name.
    pub fn resolve_editor(&self, label: &str) -> Result<String, CatalogError> {
        Ok(self.resolver()?.resolve(label).to_string())
    }

    /// Appends an instrument. Returns `false` without writing if the name is blank or
    /// already known.
    pub fn add(&mut self, name: &str, editor: Option<&str>) -> Result<bool, CatalogError> {
        if name.trim().is_empty() {
            debug!("Refusing to add a blank instrument name");
            return Ok(false);
        }
        if self.contains(name) {
            debug!("Instrument '{}' already in catalog", name);
            return Ok(false);
        }

        let mut next = self.clone();
        if editor.is_some() {
            next.format = CatalogFormat::Records;
        }
        next.records.push(InstrumentRecord {
            name: name.to_string(),
            editor: editor.map(str::to_string),
        });
        self.commit(next)?;
        info_fn!("add", "Added '{}' to catalog", name);
        Ok(true)
    }

    /// Removes an instrument. Returns `false` without writing if it is absent.
    pub fn remove(&mut self, name: &str) -> Result<bool, CatalogError> {
        let Some(idx) = self.position(name) else {
            debug!("Instrument '{}' not in catalog, nothing to remove", name);
            return Ok(false);
        };

        let mut next = self.clone();
        next.records.remove(idx);
        self.commit(next)?;
        info_fn!("remove", "Removed '{}' from catalog", name);
        Ok(true)
    }

    /// Renames an instrument in place, keeping its position and editor.
    ///
    /// Returns `false` without writing if `old_name` is absent or `new_name` is blank
    /// or already names a different entry.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<bool, CatalogError> {
        let Some(idx) = self.position(old_name) else {
            return Ok(false);
        };
        if old_name == new_name || new_name.trim().is_empty() {
            return Ok(false);
        }
        if self.contains(new_name) {
            debug!("Cannot rename '{}': '{}' already exists", old_name, new_name);
            return Ok(false);
        }

        let mut next = self.clone();
        next.records[idx].name = new_name.to_string();
        self.commit(next)?;
        info_fn!("rename", "Renamed '{}' to '{}'", old_name, new_name);
        Ok(true)
    }

    /// Sets or clears the editor of an instrument. Returns `false` if it is absent.
    pub fn set_editor(&mut self, name: &str, editor: Option<&str>) -> Result<bool, CatalogError> {
        let Some(idx) = self.position(name) else {
            return Ok(false);
        };

        let mut next = self.clone();
        next.records[idx].editor = editor.map(str::to_string);
        if editor.is_some() {
            next.format = CatalogFormat::Records;
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Writes `next` and adopts it only once the file is on disk.
    fn commit(&mut self, next: Self) -> Result<(), CatalogError> {
        next.save()?;
        *self = next;
        Ok(())
    }

    /// Writes the whole catalog, keeping the legacy bare-name shape while no record
    /// has an editor.
    pub fn save(&self) -> Result<(), CatalogError> {
        let legacy = self.format == CatalogFormat::Legacy
            && self.records.iter().all(|r| r.editor.is_none());

        let entries: Vec<CatalogEntry> = if legacy {
            self.records
                .iter()
                .map(|r| CatalogEntry::Name(r.name.clone()))
                .collect()
        } else {
            self.records.iter().map(CatalogEntry::from).collect()
        };

        let json = serde_json::to_string_pretty(&entries).map_err(CatalogError::Serialize)?;
        write_file(&self.path, json.as_bytes())?;
        debug_fn!(
            "save",
            "Saved {} instruments to {}",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }
}
