//! Recent files registry.
//!
//! Ordered, de-duplicated, size-bounded list of recently opened paths,
//! most recent first. Entries age out only by truncation when newer ones
//! push them past capacity — there is no explicit remove.

use crate::storage::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of entries kept, matching the file menu's size.
pub const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentFiles {
    entries: Vec<PathBuf>,
    capacity: usize,
}

impl Default for RecentFiles {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RecentFiles {
    /// Capacity is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record that `path` was just opened or saved.
    ///
    /// Moves an already-present path to the front instead of duplicating it,
    /// then truncates to capacity. Untouched entries keep their relative
    /// order.
    pub fn record_use(&mut self, path: PathBuf) {
        self.entries.retain(|p| p != &path);
        self.entries.insert(0, path);
        self.entries.truncate(self.capacity);
    }

    /// Entries in recency order, most recent first.
    pub fn list(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Load from a JSON config file.
    pub fn load(config_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(config_path)?;
        let mut loaded: Self = serde_json::from_str(&contents)?;
        loaded.capacity = loaded.capacity.max(1);
        loaded.entries.truncate(loaded.capacity);
        Ok(loaded)
    }

    /// Save to a JSON config file, creating parent directories as needed.
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(recent: &RecentFiles) -> Vec<&str> {
        recent
            .list()
            .iter()
            .map(|p| p.to_str().unwrap())
            .collect()
    }

    #[test]
    fn test_starts_empty() {
        let recent = RecentFiles::default();
        assert!(recent.is_empty());
        assert_eq!(recent.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_most_recent_first() {
        let mut recent = RecentFiles::default();
        recent.record_use(PathBuf::from("a"));
        recent.record_use(PathBuf::from("b"));
        assert_eq!(paths(&recent), ["b", "a"]);
    }

    #[test]
    fn test_reuse_moves_to_front_without_duplicating() {
        let mut recent = RecentFiles::default();
        recent.record_use(PathBuf::from("a"));
        recent.record_use(PathBuf::from("b"));
        recent.record_use(PathBuf::from("a"));
        assert_eq!(paths(&recent), ["a", "b"]);
    }

    #[test]
    fn test_reuse_keeps_length() {
        let mut recent = RecentFiles::default();
        recent.record_use(PathBuf::from("a"));
        recent.record_use(PathBuf::from("b"));
        recent.record_use(PathBuf::from("c"));
        let before = recent.list().len();
        recent.record_use(PathBuf::from("b"));
        assert_eq!(recent.list().len(), before);
        assert_eq!(paths(&recent), ["b", "c", "a"]);
    }

    #[test]
    fn test_oldest_entry_evicted_at_capacity() {
        let mut recent = RecentFiles::new(2);
        recent.record_use(PathBuf::from("a"));
        recent.record_use(PathBuf::from("b"));
        recent.record_use(PathBuf::from("c"));
        assert_eq!(paths(&recent), ["c", "b"]);
    }

    #[test]
    fn test_overflow_keeps_capacity_most_recent_in_order() {
        let mut recent = RecentFiles::new(3);
        for name in ["a", "b", "c", "d", "e"] {
            recent.record_use(PathBuf::from(name));
        }
        assert_eq!(recent.list().len(), 3);
        assert_eq!(paths(&recent), ["e", "d", "c"]);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut recent = RecentFiles::new(0);
        recent.record_use(PathBuf::from("a"));
        assert_eq!(paths(&recent), ["a"]);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("inkcore-recent-{}", std::process::id()));
        let config = dir.join("recent.json");

        let mut recent = RecentFiles::new(4);
        recent.record_use(PathBuf::from("/docs/a.txt"));
        recent.record_use(PathBuf::from("/docs/b.txt"));
        recent.save(&config).unwrap();

        let loaded = RecentFiles::load(&config).unwrap();
        assert_eq!(loaded.capacity(), 4);
        assert_eq!(loaded.list(), recent.list());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
