use std::sync::LazyLock;

use regex::Regex;

use super::substitute::{decode_newlines, join_concatenation, remove_quotes};
use super::{compiled, push_resolved, OutputExtractor, Pattern};
use crate::error::Result;
use crate::language::Language;
use crate::log::{LogEntry, LogSequence};

static PRINTLN_CALL: Pattern = LazyLock::new(|| Regex::new(r"System\.out\.println\((.*?)\);"));

pub struct JavaExtractor;

impl JavaExtractor {
    /// Display text for the raw argument of `System.out.println(...)`.
    ///
    /// Quotes are dropped and `+` concatenation collapses to single spaces,
    /// so `"Total: " + n` shows as `Total: n`.
    pub fn resolve(argument: &str) -> Result<String> {
        let content = remove_quotes(argument.trim());
        let content = join_concatenation(&content)?;
        Ok(decode_newlines(&content))
    }
}

impl OutputExtractor for JavaExtractor {
    fn language(&self) -> Language {
        Language::Java
    }

    fn extract_into(&self, source: &str, log: &mut LogSequence) -> Result<()> {
        log.push(LogEntry::info(">>> Compiling Java..."));
        log.push(LogEntry::info(">>> Running Main class..."));
        log.push(LogEntry::blank());

        let println_call = compiled(&PRINTLN_CALL)?;
        for line in source.split('\n') {
            if let Some(caps) = println_call.captures(line) {
                let resolved = Self::resolve(&caps[1])?;
                push_resolved(log, &resolved, true);
            }
        }

        log.push(LogEntry::blank());
        log.push(LogEntry::info(">>> BUILD SUCCESSFUL"));
        Ok(())
    }
}
