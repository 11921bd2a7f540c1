//! Find/replace engine — a linear scan over the whole document.
//!
//! Mirrors the classic dialog behavior: "find next" continues from the
//! cursor, restarts from the top whenever the query changes, and stops with
//! no wrap once the last match is passed. Replace swaps the current match
//! and the shell then asks for the next one.

use std::ops::Range;

/// State behind the find/replace dialog. The text itself stays in the shell.
#[derive(Debug, Clone, Default)]
pub struct FindReplace {
    pub query: String,
    pub replacement: String,
    /// Last query actually searched; a change restarts from the top.
    last_query: String,
}

impl FindReplace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the next occurrence of the query at or after byte offset `from`.
    ///
    /// If the query changed since the previous search, the scan restarts at
    /// the top of the document regardless of `from`. Returns the byte range
    /// of the match, or None when no further match exists.
    pub fn find_next(&mut self, text: &str, from: usize) -> Option<Range<usize>> {
        if self.query.is_empty() {
            return None;
        }
        let start = if self.query != self.last_query {
            0
        } else {
            from.min(text.len())
        };
        self.last_query = self.query.clone();
        text.get(start..)
            .and_then(|tail| tail.find(&self.query))
            .map(|pos| {
                let begin = start + pos;
                begin..begin + self.query.len()
            })
    }

    /// Replace the match at `selection` with the replacement text and return
    /// the byte offset just past the inserted text, where the next search
    /// should continue. Does nothing if `selection` is not a current match.
    pub fn replace_selection(&self, text: &mut String, selection: Range<usize>) -> Option<usize> {
        if self.query.is_empty() {
            return None;
        }
        if text.get(selection.clone()) != Some(self.query.as_str()) {
            return None;
        }
        text.replace_range(selection.clone(), &self.replacement);
        Some(selection.start + self.replacement.len())
    }

    /// Replace every occurrence in the document. Returns the new text and the
    /// number of occurrences replaced.
    pub fn replace_all(&self, text: &str) -> (String, usize) {
        if self.query.is_empty() {
            return (text.to_string(), 0);
        }
        let count = text.matches(&self.query).count();
        (text.replace(&self.query, &self.replacement), count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(query: &str, replacement: &str) -> FindReplace {
        FindReplace {
            query: query.to_string(),
            replacement: replacement.to_string(),
            last_query: String::new(),
        }
    }

    #[test]
    fn test_empty_query_is_a_noop() {
        let mut fr = engine("", "x");
        assert_eq!(fr.find_next("anything", 0), None);
        let (out, n) = fr.replace_all("anything");
        assert_eq!(out, "anything");
        assert_eq!(n, 0);
    }

    #[test]
    fn test_find_next_walks_matches_in_order() {
        let mut fr = engine("ab", "");
        let text = "ab cab ab";
        let first = fr.find_next(text, 0).unwrap();
        assert_eq!(first, 0..2);
        let second = fr.find_next(text, first.end).unwrap();
        assert_eq!(second, 4..6);
        let third = fr.find_next(text, second.end).unwrap();
        assert_eq!(third, 7..9);
        assert_eq!(fr.find_next(text, third.end), None);
    }

    #[test]
    fn test_changed_query_restarts_from_top() {
        let mut fr = engine("two", "");
        let text = "one two one";
        assert_eq!(fr.find_next(text, 0), Some(4..7));
        // Cursor is past the first "one"; a fresh query still finds it.
        fr.query = "one".to_string();
        assert_eq!(fr.find_next(text, 7), Some(0..3));
        // Same query again continues from the cursor instead.
        assert_eq!(fr.find_next(text, 3), Some(8..11));
    }

    #[test]
    fn test_replace_selection_advances_past_insertion() {
        let fr = engine("cat", "mouse");
        let mut text = "cat and cat".to_string();
        let next = fr.replace_selection(&mut text, 0..3).unwrap();
        assert_eq!(text, "mouse and cat");
        assert_eq!(next, 5);
    }

    #[test]
    fn test_replace_selection_rejects_stale_selection() {
        let fr = engine("cat", "mouse");
        let mut text = "dog and cat".to_string();
        assert_eq!(fr.replace_selection(&mut text, 0..3), None);
        assert_eq!(text, "dog and cat");
    }

    #[test]
    fn test_replace_all_counts_occurrences() {
        let fr = engine("aa", "b");
        let (out, n) = fr.replace_all("aa x aa x aa");
        assert_eq!(out, "b x b x b");
        assert_eq!(n, 3);
    }

    #[test]
    fn test_replace_all_with_no_matches() {
        let fr = engine("zzz", "b");
        let (out, n) = fr.replace_all("nothing here");
        assert_eq!(out, "nothing here");
        assert_eq!(n, 0);
    }
}
