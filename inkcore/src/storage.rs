//! Storage helpers — config locations and plain-text document I/O.
//!
//! Document content is one opaque UTF-8 string read or written whole.
//! A failed call leaves everything unchanged; the shell reports the error
//! and the document state must stay dirty.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Read a whole document as UTF-8 text.
pub fn load_text(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Write a whole document as UTF-8 text. All-or-nothing from the caller's
/// perspective: no partial-write or atomic-rename guarantee.
pub fn save_text(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)?;
    Ok(())
}

/// Config directory for inkpad apps.
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("", "", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// The user's documents directory, falling back to the working directory.
pub fn documents_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trip() {
        let dir = std::env::temp_dir().join(format!("inkcore-storage-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("doc.txt");

        save_text(&file, "héllo\nworld\n").unwrap();
        assert_eq!(load_text(&file).unwrap(), "héllo\nworld\n");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("inkcore-storage-missing/none.txt");
        assert!(load_text(&missing).is_err());
    }
}
