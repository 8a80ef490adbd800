use std::sync::LazyLock;

use regex::Regex;

use super::substitute::{decode_newlines, formatted_body, strip_outer_quotes, substitute_placeholders};
use super::{compiled, push_resolved, OutputExtractor, Pattern};
use crate::error::Result;
use crate::language::Language;
use crate::log::{LogEntry, LogSequence};

static PRINT_CALL: Pattern = LazyLock::new(|| Regex::new(r"print\((.*)\)"));

pub struct PythonExtractor;

impl PythonExtractor {
    /// Display text for the raw argument of a `print(...)` call.
    pub fn resolve(argument: &str) -> Result<String> {
        let content = argument.trim();
        let content = if content.starts_with("f\"") || content.starts_with("f'") {
            substitute_placeholders(formatted_body(content))?
        } else {
            strip_outer_quotes(content).to_string()
        };
        Ok(decode_newlines(&content))
    }
}

impl OutputExtractor for PythonExtractor {
    fn language(&self) -> Language {
        Language::Python
    }

    fn extract_into(&self, source: &str, log: &mut LogSequence) -> Result<()> {
        log.push(LogEntry::info(">>> Python Execution Started"));
        log.push(LogEntry::blank());

        let print_call = compiled(&PRINT_CALL)?;
        for line in source.split('\n') {
            let Some(caps) = print_call.captures(line) else {
                continue;
            };
            let resolved = Self::resolve(&caps[1])?;
            push_resolved(log, &resolved, false);
        }

        log.push(LogEntry::blank());
        log.push(LogEntry::info(">>> Execution Completed Successfully"));
        Ok(())
    }
}
