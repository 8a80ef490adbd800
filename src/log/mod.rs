//! Classified execution log produced by a simulated run.

use serde::Serialize;

/// Display category of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Info,
    Success,
    Error,
    Warning,
    Output,
}

/// One line of simulated output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub text: String,
    #[serde(rename = "type")]
    pub classification: Classification,
}

impl LogEntry {
    pub fn new(text: impl Into<String>, classification: Classification) -> Self {
        Self {
            text: text.into(),
            classification,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Classification::Info)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Classification::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Classification::Error)
    }

    /// A blank `output` line, used to frame a run.
    pub fn blank() -> Self {
        Self::new(String::new(), Classification::Output)
    }
}

/// Append-only trace of one run.
///
/// Entries are never edited or removed one at a time; the only way to drop
/// history is [`LogSequence::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LogSequence {
    entries: Vec<LogEntry>,
}

impl LogSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<LogEntry> {
        self.entries
    }

    /// Texts of the entries with the given classification, in order.
    pub fn texts_of(&self, classification: Classification) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.classification == classification)
            .map(|e| e.text.as_str())
            .collect()
    }
}
