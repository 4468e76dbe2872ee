//! Persistent tag usage counter.
//!
//! Tags are stored as a JSON object mapping each tag to the number of times it was
//! applied. Key order in the file is the order tags were first used, and that order
//! breaks ties in [`TagUsageStore::top_n`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Map, Value};

use crate::debug_fn;
use crate::error::TagStoreError;
use crate::models::TagUsage;
use crate::utils::{read_optional_file, write_file};

/// File name used for the tag store inside the application data directory.
pub const TAGS_FILE_NAME: &str = "tags.json";

#[derive(Debug, Clone)]
pub struct TagUsageStore {
    path: PathBuf,
    // First-use order; never contains a zero count.
    tags: Vec<TagUsage>,
}

impl TagUsageStore {
    /// Loads the store at `path`. A missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, TagStoreError> {
        let path = path.into();
        let Some(data) = read_optional_file(&path)? else {
            debug!("Tag store {} not found, starting empty", path.display());
            return Ok(Self {
                path,
                tags: Vec::new(),
            });
        };

        let map: Map<String, Value> =
            serde_json::from_slice(&data).map_err(|source| TagStoreError::Parse {
                path: path.clone(),
                source,
            })?;

        let mut tags = Vec::with_capacity(map.len());
        for (tag, value) in map {
            let count = value
                .as_u64()
                .filter(|count| *count > 0)
                .ok_or_else(|| TagStoreError::InvalidCount {
                    path: path.clone(),
                    tag: tag.clone(),
                })?;
            tags.push(TagUsage { tag, count });
        }

        debug_fn!("load", "Loaded {} tags from {}", tags.len(), path.display());
        Ok(Self { path, tags })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Usage count of `tag`, `0` if it was never used.
    pub fn count(&self, tag: &str) -> u64 {
        self.tags
            .iter()
            .find(|t| t.tag == tag.trim())
            .map_or(0, |t| t.count)
    }

    /// Records one more use of `tag`. Empty tags are ignored.
    ///
    /// Returns the new count, or `None` when nothing was recorded.
    pub fn increment(&mut self, tag: &str) -> Result<Option<u64>, TagStoreError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Ok(None);
        }

        // Changes are applied to a copy and kept only once the file is written.
        let mut next = self.clone();
        let count = match next.tags.iter_mut().find(|t| t.tag == tag) {
            Some(usage) => {
                usage.count += 1;
                usage.count
            }
            None => {
                next.tags.push(TagUsage {
                    tag: tag.to_string(),
                    count: 1,
                });
                1
            }
        };

        next.save()?;
        *self = next;
        Ok(Some(count))
    }

    /// Up to `n` tags, most used first. Equal counts keep first-use order.
    pub fn top_n(&self, n: usize) -> Vec<TagUsage> {
        let mut sorted = self.tags.clone();
        // Stable sort, so insertion order survives among ties.
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted.truncate(n);
        sorted
    }

    /// The `n` most used tags that are not already in `selected`.
    pub fn popular_suggestions(&self, n: usize, selected: &HashSet<String>) -> Vec<String> {
        self.top_n(n)
            .into_iter()
            .map(|usage| usage.tag)
            .filter(|tag| !selected.contains(tag))
            .collect()
    }

    /// All known tags in alphabetical order.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.tags.iter().map(|t| t.tag.clone()).collect();
        tags.sort();
        tags
    }

    /// Deletes `tag` (trimmed). Returns `false` without writing if it is unknown.
    pub fn remove(&mut self, tag: &str) -> Result<bool, TagStoreError> {
        let tag = tag.trim();
        let Some(idx) = self.tags.iter().position(|t| t.tag == tag) else {
            return Ok(false);
        };

        let mut next = self.clone();
        next.tags.remove(idx);
        next.save()?;
        *self = next;
        Ok(true)
    }

    /// Forgets every tag.
    pub fn reset(&mut self) -> Result<(), TagStoreError> {
        let next = Self {
            path: self.path.clone(),
            tags: Vec::new(),
        };
        next.save()?;
        *self = next;
        Ok(())
    }

    fn save(&self) -> Result<(), TagStoreError> {
        let map: Map<String, Value> = self
            .tags
            .iter()
            .map(|t| (t.tag.clone(), Value::from(t.count)))
            .collect();

        let json = serde_json::to_string_pretty(&map).map_err(TagStoreError::Serialize)?;
        write_file(&self.path, json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> TagUsageStore {
        TagUsageStore::load(dir.path().join(TAGS_FILE_NAME)).unwrap()
    }

    #[test]
    fn test_increment_top_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let mut tags = store(&temp_dir);

        for _ in 0..3 {
            tags.increment("kick").unwrap();
        }
        let top = tags.top_n(1);
        assert_eq!(top, vec![TagUsage { tag: "kick".to_string(), count: 3 }]);

        assert!(tags.remove("kick").unwrap());
        assert!(!tags.all_tags().contains(&"kick".to_string()));
    }

    #[test]
    fn test_increment_trims_and_ignores_empty() {
        let temp_dir = TempDir::new().unwrap();
        let mut tags = store(&temp_dir);

        assert_eq!(tags.increment("   ").unwrap(), None);
        assert!(!tags.path().exists());

        assert_eq!(tags.increment("  techno ").unwrap(), Some(1));
        assert_eq!(tags.increment("techno").unwrap(), Some(2));
        assert_eq!(tags.all_tags(), vec!["techno"]);
    }

    #[test]
    fn test_ties_keep_first_use_order_across_reload() {
        let temp_dir = TempDir::new().unwrap();
        let mut tags = store(&temp_dir);

        tags.increment("zebra").unwrap();
        tags.increment("ambient").unwrap();
        tags.increment("mix").unwrap();
        tags.increment("mix").unwrap();

        let reloaded = store(&temp_dir);
        let order: Vec<String> = reloaded.top_n(10).into_iter().map(|t| t.tag).collect();
        assert_eq!(order, vec!["mix", "zebra", "ambient"]);
    }

    #[test]
    fn test_all_tags_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let mut tags = store(&temp_dir);
        for tag in ["vocals", "bass", "drums"] {
            tags.increment(tag).unwrap();
        }
        assert_eq!(tags.all_tags(), vec!["bass", "drums", "vocals"]);
    }

    #[test]
    fn test_popular_suggestions_skip_selected() {
        let temp_dir = TempDir::new().unwrap();
        let mut tags = store(&temp_dir);
        tags.increment("house").unwrap();
        tags.increment("house").unwrap();
        tags.increment("demo").unwrap();

        let selected: HashSet<String> = ["house".to_string()].into_iter().collect();
        assert_eq!(tags.popular_suggestions(5, &selected), vec!["demo"]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut tags = store(&temp_dir);
        assert!(!tags.remove("ghost").unwrap());
        assert!(!tags.path().exists());
    }

    #[test]
    fn test_reset_persists_empty_object() {
        let temp_dir = TempDir::new().unwrap();
        let mut tags = store(&temp_dir);
        tags.increment("wip").unwrap();
        tags.reset().unwrap();

        assert!(store(&temp_dir).is_empty());
        assert_eq!(fs::read_to_string(tags.path()).unwrap(), "{}");
    }

    #[test]
    fn test_remove_trims_like_increment() {
        let temp_dir = TempDir::new().unwrap();
        let mut tags = store(&temp_dir);
        tags.increment("kick").unwrap();

        assert!(tags.remove("  kick ").unwrap());
        assert_eq!(tags.count("kick"), 0);
        assert!(store(&temp_dir).is_empty());
    }

    #[test]
    fn test_failed_write_keeps_memory_in_sync() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the parent directory should be makes every write fail
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let mut tags = TagUsageStore::load(blocker.join(TAGS_FILE_NAME)).unwrap();

        assert!(matches!(
            tags.increment("kick"),
            Err(TagStoreError::FileError(_))
        ));
        assert_eq!(tags.count("kick"), 0);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_invalid_counts_fail_at_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(TAGS_FILE_NAME);
        fs::write(&path, r#"{"kick": 0}"#).unwrap();

        assert!(matches!(
            TagUsageStore::load(&path),
            Err(TagStoreError::InvalidCount { .. })
        ));
    }
}
