//! Sidebar file-browser state.
//!
//! A flat listing of one directory at a time: parent entry first, then
//! directories, then files, each group sorted case-insensitively. Hidden
//! files are skipped. Folder creation and deletion are direct pass-throughs
//! to the filesystem's recursive primitives; the confirmation step before a
//! delete belongs to the UI shell, not here.

use crate::storage::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

#[derive(Debug, Clone)]
pub struct FileBrowser {
    pub current_dir: PathBuf,
    pub entries: Vec<DirEntry>,
    pub selected: Option<usize>,
    filter_extensions: Vec<String>,
}

impl FileBrowser {
    pub fn new(start_dir: PathBuf) -> Self {
        let mut browser = Self {
            current_dir: start_dir,
            entries: Vec::new(),
            selected: None,
            filter_extensions: Vec::new(),
        };
        browser.refresh();
        browser
    }

    /// Restrict file entries (not directories) to the given extensions,
    /// compared case-insensitively.
    pub fn with_filter(mut self, extensions: Vec<String>) -> Self {
        self.filter_extensions = extensions
            .into_iter()
            .map(|e| e.to_lowercase())
            .collect();
        self.refresh();
        self
    }

    /// Re-read the current directory. Clears the selection.
    pub fn refresh(&mut self) {
        self.entries.clear();
        self.selected = None;

        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(DirEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
            });
        }

        let Ok(read_dir) = std::fs::read_dir(&self.current_dir) else {
            return;
        };

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in read_dir.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let is_dir = path.is_dir();
            if !is_dir && !self.matches_filter(&path) {
                continue;
            }
            let entry = DirEntry { name, path, is_dir };
            if is_dir {
                dirs.push(entry);
            } else {
                files.push(entry);
            }
        }

        dirs.sort_by_key(|e| e.name.to_lowercase());
        files.sort_by_key(|e| e.name.to_lowercase());
        self.entries.extend(dirs);
        self.entries.extend(files);
    }

    fn matches_filter(&self, path: &Path) -> bool {
        if self.filter_extensions.is_empty() {
            return true;
        }
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        self.filter_extensions.iter().any(|f| *f == ext)
    }

    /// Enter `path` if it is a directory.
    pub fn navigate_to(&mut self, path: PathBuf) {
        if path.is_dir() {
            self.current_dir = path;
            self.refresh();
        }
    }

    pub fn selected_entry(&self) -> Option<&DirEntry> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    /// Create a folder inside the current directory, parents included.
    /// Rejects blank names and names that already exist.
    pub fn create_folder(&mut self, name: &str) -> Result<PathBuf> {
        let name = name.trim();
        if name.is_empty() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "folder name is empty",
            )
            .into());
        }
        let new_path = self.current_dir.join(name);
        if new_path.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("'{}' already exists", name),
            )
            .into());
        }
        std::fs::create_dir_all(&new_path)?;
        self.refresh();
        Ok(new_path)
    }

    /// Delete a file or a whole directory tree. The caller must have
    /// confirmed with the user first.
    pub fn delete(&mut self, path: &Path) -> Result<()> {
        if path.is_dir() {
            std::fs::remove_dir_all(path)?;
        } else {
            std::fs::remove_file(path)?;
        }
        self.refresh();
        Ok(())
    }
}
