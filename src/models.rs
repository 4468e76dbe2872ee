use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Editor label used when a record carries no editor or a label cannot be resolved.
pub const UNKNOWN_EDITOR: &str = "Unknown";

/// A known virtual instrument as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

impl InstrumentRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            editor: None,
        }
    }

    pub fn with_editor(name: impl Into<String>, editor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            editor: Some(editor.into()),
        }
    }

    /// The editor label, falling back to [`UNKNOWN_EDITOR`].
    pub fn editor_or_unknown(&self) -> &str {
        self.editor.as_deref().unwrap_or(UNKNOWN_EDITOR)
    }
}

/// One element of the on-disk catalog array.
///
/// Older catalogs are a flat list of names, newer ones hold `{name, editor}` objects.
/// Both shapes are accepted and normalized into [`InstrumentRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Name(String),
    Record {
        #[serde(default)]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        editor: Option<String>,
    },
}

impl CatalogEntry {
    pub fn is_record(&self) -> bool {
        matches!(self, CatalogEntry::Record { .. })
    }

    /// Normalizes the entry; a record without a name becomes an empty-name record.
    pub fn into_record(self) -> InstrumentRecord {
        match self {
            CatalogEntry::Name(name) => InstrumentRecord::new(name),
            CatalogEntry::Record { name, editor } => InstrumentRecord {
                name: name.unwrap_or_default(),
                editor,
            },
        }
    }
}

impl From<&InstrumentRecord> for CatalogEntry {
    fn from(record: &InstrumentRecord) -> Self {
        CatalogEntry::Record {
            name: Some(record.name.clone()),
            editor: record.editor.clone(),
        }
    }
}

/// On-disk shape a catalog was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    /// Every entry is a bare name string.
    #[default]
    Legacy,
    /// At least one entry is a `{name, editor}` object.
    Records,
}

impl fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogFormat::Legacy => write!(f, "legacy (bare names)"),
            CatalogFormat::Records => write!(f, "records"),
        }
    }
}

/// How a scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Completed,
    /// The progress callback asked to stop; the result holds what was found so far.
    Cancelled,
}

/// Instrument labels found in one project file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    pub instruments: HashSet<String>,
    pub status: ScanStatus,
}

impl DetectionResult {
    pub fn is_cancelled(&self) -> bool {
        self.status == ScanStatus::Cancelled
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// The labels in lexicographic order, for display.
    pub fn sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = self.instruments.iter().cloned().collect();
        names.sort();
        names
    }
}

/// Detected labels sharing one resolved editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorGroup {
    pub editor: String,
    pub names: Vec<String>,
}

/// A tag and how many times it has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUsage {
    pub tag: String,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entry_accepts_both_shapes() {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(r#"["Serum", {"name": "Kontakt 7", "editor": "Native Instruments"}, {"name": "Pigments"}]"#)
                .unwrap();

        assert_eq!(entries[0], CatalogEntry::Name("Serum".to_string()));
        assert!(entries[1].is_record());

        let records: Vec<InstrumentRecord> =
            entries.into_iter().map(CatalogEntry::into_record).collect();
        assert_eq!(records[0], InstrumentRecord::new("Serum"));
        assert_eq!(records[1].editor_or_unknown(), "Native Instruments");
        assert_eq!(records[2].editor_or_unknown(), UNKNOWN_EDITOR);
    }

    #[test]
    fn test_record_without_name_normalizes_to_empty() {
        let entry: CatalogEntry = serde_json::from_str(r#"{"editor": "Xfer"}"#).unwrap();
        assert_eq!(entry.into_record().name, "");
    }

    #[test]
    fn test_record_serialization_skips_missing_editor() {
        let json = serde_json::to_string(&InstrumentRecord::new("Serum")).unwrap();
        assert_eq!(json, r#"{"name":"Serum"}"#);
    }
}
