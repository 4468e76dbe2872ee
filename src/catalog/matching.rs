use regex::Regex;

use crate::error::PatternError;
use crate::models::{InstrumentRecord, UNKNOWN_EDITOR};
use crate::trace_fn;

/// Which rule resolved a label to an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// Case-insensitive equality.
    Exact,
    /// Catalog name optionally followed by whitespace and digits.
    NumberedSuffix,
    /// Like `NumberedSuffix`, with spaces removed on both sides.
    Spaceless,
    /// Catalog name appears anywhere in the label.
    Contains,
}

struct CompiledEntry<'a> {
    record: &'a InstrumentRecord,
    name_lower: String,
    numbered: Regex,
    spaceless: Regex,
}

/// Resolves free-text instrument labels to editor names.
///
/// Patterns are compiled once so that grouping a whole detection result does not
/// rebuild them per label. Tiers are tried in order and the first record (in catalog
/// order) that satisfies a tier wins, so a loose tier never hides a stricter match
/// further down the catalog.
pub struct EditorResolver<'a> {
    entries: Vec<CompiledEntry<'a>>,
    has_editors: bool,
}

impl<'a> EditorResolver<'a> {
    pub fn new(records: &'a [InstrumentRecord]) -> Result<Self, PatternError> {
        // Editors only exist when the catalog is in record form; the first record decides.
        let has_editors = records.first().map_or(false, |r| r.editor.is_some());

        let mut entries = Vec::new();
        if has_editors {
            for record in records {
                let name = record.name.trim();
                if name.is_empty() {
                    continue;
                }
                let spaceless_name = name.to_lowercase().replace(' ', "");
                entries.push(CompiledEntry {
                    record,
                    name_lower: name.to_lowercase(),
                    numbered: Regex::new(&format!(r"(?i)^{}\s*\d*$", regex::escape(name)))?,
                    spaceless: Regex::new(&format!(r"^{}\d*$", regex::escape(&spaceless_name)))?,
                });
            }
        }

        Ok(Self {
            entries,
            has_editors,
        })
    }

    /// Whether the catalog carries editors at all.
    pub fn has_editors(&self) -> bool {
        self.has_editors
    }

    /// Finds the record a label refers to, along with the tier that matched.
    pub fn find(&self, label: &str) -> Option<(&'a InstrumentRecord, MatchTier)> {
        let label = label.trim();
        let label_lower = label.to_lowercase();

        if let Some(entry) = self.entries.iter().find(|e| e.name_lower == label_lower) {
            return Some((entry.record, MatchTier::Exact));
        }

        if let Some(entry) = self.entries.iter().find(|e| e.numbered.is_match(label)) {
            return Some((entry.record, MatchTier::NumberedSuffix));
        }

        let label_spaceless = label_lower.replace(' ', "");
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.spaceless.is_match(&label_spaceless))
        {
            return Some((entry.record, MatchTier::Spaceless));
        }

        self.entries
            .iter()
            .find(|e| label_lower.contains(&e.name_lower))
            .map(|e| (e.record, MatchTier::Contains))
    }

    /// Resolves a label to its editor, or [`UNKNOWN_EDITOR`].
    pub fn resolve(&self, label: &str) -> &'a str {
        match self.find(label) {
            Some((record, tier)) => {
                trace_fn!(
                    "resolve",
                    "'{}' matched '{}' ({:?})",
                    label,
                    record.name,
                    tier
                );
                record.editor_or_unknown()
            }
            None => UNKNOWN_EDITOR,
        }
    }
}
