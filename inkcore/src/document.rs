//! Document modification state.
//!
//! Tracks whether the open document has unsaved changes and which file it is
//! bound to. The actual text lives in the UI shell (egui's TextEdit owns it);
//! this type only does the bookkeeping that gates destructive actions.

use std::path::{Path, PathBuf};

/// Outcome of asking whether a destructive action (new document, close)
/// may go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Go ahead, discarding the in-memory content if any.
    Proceed,
    /// Save first; proceed only once the save succeeded.
    SaveThenProceed,
    /// Leave everything exactly as it is.
    Cancel,
}

/// The user's answer to the three-way save prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Save,
    Discard,
    Cancel,
}

/// Unsaved-changes tracker for the single open document.
#[derive(Debug, Clone, Default)]
pub struct DocumentState {
    /// Path the content was last loaded from or saved to. None = untitled.
    bound_path: Option<PathBuf>,
    /// True iff content changed since the last load/save.
    dirty: bool,
}

impl DocumentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called on every content-change notification.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Called after a confirmed successful load or save. Rebinds the path
    /// when one is given. Must not be called on I/O failure.
    pub fn mark_clean(&mut self, path: Option<PathBuf>) {
        self.dirty = false;
        if let Some(p) = path {
            self.bound_path = Some(p);
        }
    }

    /// Replace the current document with a fresh untitled one.
    pub fn reset(&mut self) {
        self.bound_path = None;
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn bound_path(&self) -> Option<&Path> {
        self.bound_path.as_deref()
    }

    /// Display name for the title bar, with a `*` marker while dirty.
    pub fn display_title(&self) -> String {
        let name = self
            .bound_path
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled".to_string());
        if self.dirty {
            format!("{}*", name)
        } else {
            name
        }
    }

    /// Decision point before a destructive action.
    ///
    /// A clean document (including a never-touched blank one) proceeds
    /// immediately and `prompt` is never invoked. A dirty document defers to
    /// the caller-supplied prompt — presenting it is the shell's job; this
    /// function only maps the answer. No I/O happens here: on
    /// `SaveThenProceed` the caller must perform the save and proceed only
    /// once it succeeded.
    pub fn request_destructive_action(
        &self,
        prompt: impl FnOnce() -> PromptAnswer,
    ) -> Decision {
        if !self.dirty {
            return Decision::Proceed;
        }
        match prompt() {
            PromptAnswer::Save => Decision::SaveThenProceed,
            PromptAnswer::Discard => Decision::Proceed,
            PromptAnswer::Cancel => Decision::Cancel,
        }
    }
}

/// Whitespace-separated word count for the status bar.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Unicode scalar count for the status bar.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_fresh_state_is_clean() {
        let state = DocumentState::new();
        assert!(!state.is_dirty());
        assert!(state.bound_path().is_none());
        assert_eq!(state.display_title(), "untitled");
    }

    #[test]
    fn test_dirty_until_marked_clean() {
        let mut state = DocumentState::new();
        state.mark_dirty();
        state.mark_dirty();
        state.mark_dirty();
        assert!(state.is_dirty());
        state.mark_clean(None);
        assert!(!state.is_dirty());
    }

    #[test]
    fn test_mark_clean_binds_path() {
        let mut state = DocumentState::new();
        state.mark_dirty();
        state.mark_clean(Some(PathBuf::from("/tmp/notes.txt")));
        assert!(!state.is_dirty());
        assert_eq!(state.bound_path(), Some(Path::new("/tmp/notes.txt")));
        assert_eq!(state.display_title(), "notes.txt");
    }

    #[test]
    fn test_mark_clean_without_path_keeps_binding() {
        let mut state = DocumentState::new();
        state.mark_clean(Some(PathBuf::from("/tmp/a.txt")));
        state.mark_dirty();
        state.mark_clean(None);
        assert_eq!(state.bound_path(), Some(Path::new("/tmp/a.txt")));
    }

    #[test]
    fn test_dirty_title_decoration() {
        let mut state = DocumentState::new();
        state.mark_clean(Some(PathBuf::from("letter.txt")));
        state.mark_dirty();
        assert_eq!(state.display_title(), "letter.txt*");
    }

    #[test]
    fn test_untouched_blank_document_proceeds_without_prompt() {
        let state = DocumentState::new();
        let decision = state.request_destructive_action(|| {
            panic!("prompt must not be shown for a clean document")
        });
        assert_eq!(decision, Decision::Proceed);
    }

    #[test]
    fn test_prompt_answers_map_to_decisions() {
        let mut state = DocumentState::new();
        state.mark_dirty();
        assert_eq!(
            state.request_destructive_action(|| PromptAnswer::Save),
            Decision::SaveThenProceed
        );
        assert_eq!(
            state.request_destructive_action(|| PromptAnswer::Discard),
            Decision::Proceed
        );
        assert_eq!(
            state.request_destructive_action(|| PromptAnswer::Cancel),
            Decision::Cancel
        );
        // The decision point itself never mutates state.
        assert!(state.is_dirty());
    }

    #[test]
    fn test_reset_clears_binding_and_dirty() {
        let mut state = DocumentState::new();
        state.mark_clean(Some(PathBuf::from("/tmp/a.txt")));
        state.mark_dirty();
        state.reset();
        assert!(!state.is_dirty());
        assert!(state.bound_path().is_none());
    }

    #[test]
    fn test_word_and_char_counts() {
        assert_eq!(word_count(""), 0);
        assert_eq!(char_count(""), 0);
        assert_eq!(word_count("one  two\nthree"), 3);
        assert_eq!(char_count("héllo"), 5);
    }
}
