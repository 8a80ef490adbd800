//! Output simulation: turn source text into a plausible execution log by
//! matching print-statement shapes line by line. Nothing is executed.

mod java;
mod python;
pub mod substitute;

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::language::Language;
use crate::log::{LogEntry, LogSequence};

pub use java::JavaExtractor;
pub use python::PythonExtractor;

/// One extractor per simulated textual language.
pub trait OutputExtractor {
    fn language(&self) -> Language;

    /// Append the simulated trace of `source` to `log`.
    ///
    /// Lines that do not look like a print statement are skipped. An `Err`
    /// is an internal fault; entries pushed before it stay in `log`.
    fn extract_into(&self, source: &str, log: &mut LogSequence) -> Result<()>;
}

/// Extractor for a textual language, `None` for markup.
pub fn extractor_for(language: Language) -> Option<&'static dyn OutputExtractor> {
    match language {
        Language::Python => Some(&PythonExtractor),
        Language::Java => Some(&JavaExtractor),
        Language::Html => None,
    }
}

/// Run `extractor` and report a fault as a single trailing `error` entry.
pub fn run_extractor(extractor: &dyn OutputExtractor, source: &str) -> LogSequence {
    let mut log = LogSequence::new();
    if let Err(e) = extractor.extract_into(source, &mut log) {
        warn!(language = %extractor.language(), "extraction fault: {}", e);
        log.push(LogEntry::error(format!("Error: {}", e)));
    }
    debug!(
        language = %extractor.language(),
        entries = log.len(),
        "extraction finished"
    );
    log
}

/// Simulated trace of `source`. Markup has no textual simulation and
/// yields an empty sequence.
pub fn extract(source: &str, language: Language) -> LogSequence {
    match extractor_for(language) {
        Some(extractor) => run_extractor(extractor, source),
        None => LogSequence::new(),
    }
}

/// Append the success entries for one resolved print argument.
fn push_resolved(log: &mut LogSequence, resolved: &str, trim_pieces: bool) {
    if !resolved.contains('\n') {
        log.push(LogEntry::success(resolved));
        return;
    }
    for piece in resolved.split('\n') {
        if trim_pieces {
            let piece = piece.trim();
            if !piece.is_empty() {
                log.push(LogEntry::success(piece));
            }
        } else {
            log.push(LogEntry::success(piece));
        }
    }
}

/// A lazily built pattern; a build failure surfaces as an extraction fault.
pub(crate) type Pattern = LazyLock<std::result::Result<Regex, regex::Error>>;

pub(crate) fn compiled(cell: &'static Pattern) -> Result<&'static Regex> {
    LazyLock::force(cell)
        .as_ref()
        .map_err(|e| Error::Pattern(e.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::Classification;

    struct FaultyExtractor;

    impl OutputExtractor for FaultyExtractor {
        fn language(&self) -> Language {
            Language::Python
        }

        fn extract_into(&self, _source: &str, log: &mut LogSequence) -> Result<()> {
            log.push(LogEntry::info(">>> started"));
            log.push(LogEntry::success("partial"));
            Err(Error::Pattern(regex::Error::Syntax("unclosed group".into())))
        }
    }

    #[test]
    fn test_fault_appends_single_error_entry() {
        let log = run_extractor(&FaultyExtractor, "print('x')");
        let entries = log.entries();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].text, "partial");
        assert_eq!(entries[2].classification, Classification::Error);
        assert!(entries[2].text.starts_with("Error: "));
        assert_eq!(log.texts_of(Classification::Error).len(), 1);
    }

    #[test]
    fn test_markup_has_no_extractor() {
        assert!(extractor_for(Language::Html).is_none());
        assert!(extract("<p>hi</p>", Language::Html).is_empty());
    }

    #[test]
    fn test_extract_is_pure() {
        for lang in [Language::Python, Language::Java] {
            let source = crate::language::sample(lang);
            assert_eq!(extract(source, lang), extract(source, lang));
        }
    }

    #[test]
    fn test_push_resolved_trimming() {
        let mut kept = LogSequence::new();
        push_resolved(&mut kept, "\n a \n", false);
        assert_eq!(kept.texts_of(Classification::Success), vec!["", " a ", ""]);

        let mut trimmed = LogSequence::new();
        push_resolved(&mut trimmed, "\n a \n", true);
        assert_eq!(trimmed.texts_of(Classification::Success), vec!["a"]);
    }
}
