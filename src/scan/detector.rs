//! # Instrument detector
//!
//! Finds the virtual instruments a Cubase project references by searching the raw
//! `.cpr` bytes for catalog names. The file is never parsed; three passes run over
//! the same buffer and feed one result set:
//!
//! 1. **Numbered instances**: `Serum 01`, `Serum 02`, ... added verbatim.
//! 2. **Bare names**: `Serum` delimited by non-word bytes, added only when no
//!    collected label already contains it.
//! 3. **Generic markers**: `Plugin Name: ...` fragments; each catalog name found
//!    in one is added under the same containment rule.
//!
//! Numbered labels therefore win over bare names, which win over marker hits.
//!
//! ## Progress and cancellation
//!
//! Passes 1 and 2 each count one unit per catalog entry. After every unit the
//! callback receives `processed * 100 / total`; before pass 3 it receives `100`.
//! Returning `false` from the callback stops the scan and yields what was found
//! so far with [`ScanStatus::Cancelled`].

use std::collections::HashSet;
use std::path::Path;

use regex::bytes::Regex;

use crate::catalog::KnownInstrumentCatalog;
use crate::error::{PatternError, ScanError};
use crate::models::{DetectionResult, InstrumentRecord, ScanStatus};
use crate::scan::patterns::{
    contains_bare_name, is_covered, marker_fragments, names_in_fragment, numbered_instances,
    plugin_marker_regex,
};
use crate::utils::{format_file_size, read_file_bytes};
use crate::{debug_fn, info_fn, trace_fn};

/// Scans project files against a borrowed catalog snapshot.
pub struct InstrumentDetector<'a> {
    // Empty names stay in the list so progress still counts them.
    names: Vec<&'a str>,
    marker: Regex,
}

impl<'a> InstrumentDetector<'a> {
    pub fn new(records: &'a [InstrumentRecord]) -> Result<Self, PatternError> {
        Ok(Self {
            names: records.iter().map(|r| r.name.as_str()).collect(),
            marker: plugin_marker_regex()?,
        })
    }

    /// Number of progress units a full scan reports.
    pub fn total_units(&self) -> usize {
        self.names.len() * 2
    }

    pub fn scan_file(&self, path: &Path) -> Result<DetectionResult, ScanError> {
        self.scan_file_with_progress::<fn(u8) -> bool>(path, None)
    }

    /// Reads `path` entirely and scans its bytes.
    ///
    /// A missing or unreadable file is an error; no partial result is produced.
    pub fn scan_file_with_progress<F>(
        &self,
        path: &Path,
        progress_callback: Option<F>,
    ) -> Result<DetectionResult, ScanError>
    where
        F: FnMut(u8) -> bool,
    {
        info_fn!("scan_file", "Analysing {}", path.display());
        let data = read_file_bytes(path)?;
        debug_fn!("scan_file", "Read {}", format_file_size(data.len() as u64));
        let result = self.scan_bytes_with_progress(&data, progress_callback)?;

        info_fn!(
            "scan_file",
            "{} instrument(s) in {} ({:?})",
            result.instruments.len(),
            path.display(),
            result.status
        );
        Ok(result)
    }

    pub fn scan_bytes(&self, data: &[u8]) -> Result<DetectionResult, PatternError> {
        self.scan_bytes_with_progress::<fn(u8) -> bool>(data, None)
    }

    pub fn scan_bytes_with_progress<F>(
        &self,
        data: &[u8],
        mut progress_callback: Option<F>,
    ) -> Result<DetectionResult, PatternError>
    where
        F: FnMut(u8) -> bool,
    {
        let mut found: HashSet<String> = HashSet::new();
        let total = self.total_units();
        let mut processed = 0usize;

        // Reports progress and bails out with the partial result when asked to stop.
        macro_rules! progress {
            ($percent:expr) => {
                if let Some(ref mut callback) = progress_callback {
                    let pct: u8 = $percent;
                    if !callback(pct) {
                        info_fn!(
                            "scan_bytes",
                            "Scan cancelled at {}% with {} instrument(s) found",
                            pct,
                            found.len()
                        );
                        return Ok(DetectionResult {
                            instruments: found,
                            status: ScanStatus::Cancelled,
                        });
                    }
                }
            };
        }

        trace_fn!(
            "scan_bytes",
            "Scanning {} bytes against {} catalog entries",
            data.len(),
            self.names.len()
        );

        for name in &self.names {
            for label in numbered_instances(data, name)? {
                debug_fn!("scan_bytes", "Numbered instance: {}", label);
                found.insert(label);
            }
            processed += 1;
            progress!(percent(processed, total));
        }

        for name in &self.names {
            if contains_bare_name(data, name)? && !is_covered(&found, name) {
                debug_fn!("scan_bytes", "Bare name: {}", name);
                found.insert(name.to_string());
            }
            processed += 1;
            progress!(percent(processed, total));
        }

        progress!(100);

        for fragment in marker_fragments(&self.marker, data) {
            trace_fn!("scan_bytes", "Marker fragment: {:?}", fragment);
            for name in names_in_fragment(&fragment, &self.names) {
                if !is_covered(&found, name) {
                    debug_fn!("scan_bytes", "Marker name: {}", name);
                    found.insert(name.to_string());
                }
            }
        }

        Ok(DetectionResult {
            instruments: found,
            status: ScanStatus::Completed,
        })
    }
}

fn percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (processed.min(total) * 100 / total) as u8
}

/// Scans `path` against `catalog` without progress reporting.
pub fn scan_file(path: &Path, catalog: &KnownInstrumentCatalog) -> Result<DetectionResult, ScanError> {
    InstrumentDetector::new(catalog.records())?.scan_file(path)
}

/// Scans `path` against `catalog`, reporting progress to `progress_callback`.
pub fn scan_file_with_progress<F>(
    path: &Path,
    catalog: &KnownInstrumentCatalog,
    progress_callback: Option<F>,
) -> Result<DetectionResult, ScanError>
where
    F: FnMut(u8) -> bool,
{
    InstrumentDetector::new(catalog.records())?.scan_file_with_progress(path, progress_callback)
}
