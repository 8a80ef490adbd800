//! Text rewrites shared by the output extractors.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{compiled, Pattern};
use crate::error::Result;

static PLACEHOLDER: Pattern = LazyLock::new(|| Regex::new(r"\{([^}]+)\}"));

static CONCAT_OPERATOR: Pattern = LazyLock::new(|| Regex::new(r"\s*\+\s*"));

pub const SUM_PLACEHOLDER: &str = "SUM_VALUE";
pub const AVG_PLACEHOLDER: &str = "AVG_VALUE";

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Strip at most one quote character from each end, independently.
pub fn strip_outer_quotes(text: &str) -> &str {
    let text = text.strip_prefix(is_quote).unwrap_or(text);
    text.strip_suffix(is_quote).unwrap_or(text)
}

/// Drop every quote character.
pub fn remove_quotes(text: &str) -> String {
    text.chars().filter(|c| !is_quote(*c)).collect()
}

/// Replace each `+` operator and its surrounding whitespace with one space.
pub fn join_concatenation(text: &str) -> Result<String> {
    let re = compiled(&CONCAT_OPERATOR)?;
    Ok(re.replace_all(text, " ").into_owned())
}

/// Turn the literal two-character sequence `\n` into a line break.
pub fn decode_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Body of an `f"..."` / `f'...'` literal: the two-character prefix and
/// the final character are dropped without checking what they are.
pub fn formatted_body(text: &str) -> &str {
    let mut chars = text.char_indices();
    let start = match chars.nth(2) {
        Some((i, _)) => i,
        None => return "",
    };
    match text.char_indices().next_back() {
        Some((end, _)) if end > start => &text[start..end],
        _ => "",
    }
}

/// Display text for one `{expr}` placeholder. Nothing is evaluated: a
/// summation call wins over a division operator, anything else is echoed.
pub fn placeholder_value(expr: &str) -> &str {
    let expr = expr.trim();
    if expr.contains("sum(") {
        SUM_PLACEHOLDER
    } else if expr.contains('/') {
        AVG_PLACEHOLDER
    } else {
        expr
    }
}

pub fn substitute_placeholders(body: &str) -> Result<String> {
    let re = compiled(&PLACEHOLDER)?;
    Ok(re
        .replace_all(body, |caps: &Captures<'_>| {
            placeholder_value(&caps[1]).to_string()
        })
        .into_owned())
}
