//! Byte-level heuristics used to spot instrument names in project files.
//!
//! Cubase stores plugin instance labels as plain text inside an otherwise binary
//! container. Nothing here parses the container; each function searches the raw
//! buffer for one kind of textual trace and returns what it saw, leaving
//! precedence between the kinds to the detector.
//!
//! Matched bytes are decoded as UTF-8 with invalid sequences replaced.

use std::collections::HashSet;

use regex::bytes::Regex;

use crate::error::PatternError;

/// Generic metadata marker, e.g. `Plugin Name: Serum`, followed by 2 to 40 bytes of
/// same-line text.
pub const PLUGIN_MARKER_PATTERN: &str = r"(?-u)Plugin\s+Nam[^\n\r]{2,40}";

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Compiles the generic marker pattern.
pub fn plugin_marker_regex() -> Result<Regex, PatternError> {
    Ok(Regex::new(PLUGIN_MARKER_PATTERN)?)
}

/// Every `<name><whitespace><two digits>` occurrence of `name`, e.g. `Serum 01`.
///
/// Whitespace and digits are ASCII only. Matches are returned verbatim, so two
/// instances of the same instrument stay distinct.
pub fn numbered_instances(data: &[u8], name: &str) -> Result<Vec<String>, PatternError> {
    if name.is_empty() {
        return Ok(Vec::new());
    }

    let pattern = Regex::new(&format!(r"{}(?-u:\s)+[0-9]{{2}}", regex::escape(name)))?;
    Ok(pattern
        .find_iter(data)
        .map(|m| decode(m.as_bytes()))
        .collect())
}

/// Whether `name` occurs with no ASCII word byte directly before or after it.
pub fn contains_bare_name(data: &[u8], name: &str) -> Result<bool, PatternError> {
    if name.is_empty() {
        return Ok(false);
    }

    let literal = Regex::new(&regex::escape(name))?;
    let mut start = 0;
    while start <= data.len() {
        let Some(m) = literal.find_at(data, start) else {
            break;
        };

        let before_ok = m.start() == 0 || !is_word_byte(data[m.start() - 1]);
        let after_ok = m.end() == data.len() || !is_word_byte(data[m.end()]);
        if before_ok && after_ok {
            return Ok(true);
        }

        // Retry one byte further so overlapping occurrences are still considered.
        start = m.start() + 1;
    }

    Ok(false)
}

/// Text captured after each generic `Plugin Nam...` marker.
pub fn marker_fragments(marker: &Regex, data: &[u8]) -> Vec<String> {
    marker
        .find_iter(data)
        .map(|m| decode(m.as_bytes()))
        .collect()
}

/// Names from `names` that occur inside `fragment`, in the order given.
pub fn names_in_fragment<'n>(fragment: &str, names: &[&'n str]) -> Vec<&'n str> {
    names
        .iter()
        .copied()
        .filter(|name| !name.is_empty() && fragment.contains(name))
        .collect()
}

/// Whether an already collected label contains `name`.
///
/// This is the precedence rule shared by the bare-name and marker passes: once
/// `Serum 01` is known, a bare `Serum` adds nothing.
pub fn is_covered(found: &HashSet<String>, name: &str) -> bool {
    found.iter().any(|label| label.contains(name))
}

/// Runs [`numbered_instances`] for every name.
pub fn find_numbered(data: &[u8], names: &[&str]) -> Result<Vec<String>, PatternError> {
    let mut matches = Vec::new();
    for name in names {
        matches.extend(numbered_instances(data, name)?);
    }
    Ok(matches)
}

/// Names that occur as bare words, before any precedence is applied.
pub fn find_bare<'n>(data: &[u8], names: &[&'n str]) -> Result<Vec<&'n str>, PatternError> {
    let mut matches = Vec::new();
    for name in names {
        if contains_bare_name(data, name)? {
            matches.push(*name);
        }
    }
    Ok(matches)
}

/// Names mentioned after a generic marker, before any precedence is applied.
pub fn find_marker_names<'n>(
    data: &[u8],
    names: &[&'n str],
) -> Result<Vec<&'n str>, PatternError> {
    let marker = plugin_marker_regex()?;
    let mut matches = Vec::new();
    for fragment in marker_fragments(&marker, data) {
        for name in names_in_fragment(&fragment, names) {
            if !matches.contains(&name) {
                matches.push(name);
            }
        }
    }
    Ok(matches)
}
