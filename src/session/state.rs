//! Workbench state and its pure transitions.
//!
//! Every transition consumes the old [`State`] and returns the new one;
//! effects (scheduling, surfaces) live in [`super::Session`].

use serde::Serialize;

use crate::language::{sample, Language};
use crate::log::LogSequence;

/// Snapshot of the editor taken when a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDocument {
    pub language: Language,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct State {
    pub language: Language,
    pub source: String,
    pub log: LogSequence,
    pub running: bool,
    /// Caret offset in bytes, moved by indent insertion.
    pub cursor: usize,
}

impl State {
    /// Fresh state showing the canonical sample for `language`.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            source: sample(language).to_string(),
            log: LogSequence::new(),
            running: false,
            cursor: 0,
        }
    }

    pub fn snapshot(&self) -> SourceDocument {
        SourceDocument {
            language: self.language,
            text: self.source.clone(),
        }
    }

    /// Previous output is dropped before the run produces anything.
    pub fn begin_run(self) -> Self {
        Self {
            log: LogSequence::new(),
            running: true,
            ..self
        }
    }

    pub fn finish_run(self, log: LogSequence) -> Self {
        Self {
            log,
            running: false,
            ..self
        }
    }

    /// A run that was cancelled before it fired leaves the log empty.
    pub fn abort_run(self) -> Self {
        Self {
            running: false,
            ..self
        }
    }

    pub fn clear(self) -> Self {
        Self {
            log: LogSequence::new(),
            ..self
        }
    }

    /// Load the canonical sample for `language`, discarding any edits.
    pub fn switch_language(self, language: Language) -> Self {
        Self {
            running: self.running,
            ..Self::new(language)
        }
    }

    pub fn edit(self, text: impl Into<String>) -> Self {
        let source = text.into();
        let cursor = self.cursor.min(source.len());
        let cursor = floor_char_boundary(&source, cursor);
        Self {
            source,
            cursor,
            ..self
        }
    }

    /// Replace `[start, end)` with `indent` and put the caret right after it.
    ///
    /// Offsets are clamped to the text and moved back to char boundaries.
    pub fn insert_indent(self, start: usize, end: usize, indent: &str) -> Self {
        let len = self.source.len();
        let start = floor_char_boundary(&self.source, start.min(len));
        let end = floor_char_boundary(&self.source, end.clamp(start, len));

        let mut source = String::with_capacity(len + indent.len());
        source.push_str(&self.source[..start]);
        source.push_str(indent);
        source.push_str(&self.source[end..]);

        Self {
            source,
            cursor: start + indent.len(),
            ..self
        }
    }
}

fn floor_char_boundary(text: &str, mut pos: usize) -> usize {
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogEntry;

    fn with_log() -> State {
        let mut log = LogSequence::new();
        log.push(LogEntry::success("old"));
        State::new(Language::Python).finish_run(log)
    }

    #[test]
    fn test_begin_run_drops_previous_log() {
        let state = with_log().begin_run();
        assert!(state.log.is_empty());
        assert!(state.running);
    }

    #[test]
    fn test_switch_language_discards_edits() {
        let state = with_log().edit("print('mine')").switch_language(Language::Java);
        assert_eq!(state.language, Language::Java);
        assert_eq!(state.source, sample(Language::Java));
        assert!(state.log.is_empty());
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_edit_replaces_text_exactly() {
        let state = with_log().edit("  x  \n");
        assert_eq!(state.source, "  x  \n");
        assert_eq!(state.log.len(), 1);
    }

    #[test]
    fn test_insert_indent_at_cursor() {
        let state = State::new(Language::Python)
            .edit("ab")
            .insert_indent(1, 1, "    ");
        assert_eq!(state.source, "a    b");
        assert_eq!(state.cursor, 5);
    }

    #[test]
    fn test_insert_indent_replaces_selection() {
        let state = State::new(Language::Python)
            .edit("abcdef")
            .insert_indent(1, 4, "    ");
        assert_eq!(state.source, "a    ef");
        assert_eq!(state.cursor, 5);
    }

    #[test]
    fn test_insert_indent_clamps_offsets() {
        let state = State::new(Language::Python)
            .edit("é")
            .insert_indent(1, 1, "    ");
        assert_eq!(state.source, "    é");
        assert_eq!(state.cursor, 4);

        let state = State::new(Language::Python)
            .edit("ab")
            .insert_indent(5, 99, "    ");
        assert_eq!(state.source, "ab    ");
        assert_eq!(state.cursor, 6);
    }
}
