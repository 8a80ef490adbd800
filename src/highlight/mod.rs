//! Syntax highlighting.
//!
//! Highlighting runs in two steps. [`tokenize`] walks the source once per
//! precedence tier (comments and strings, numbers, builtins, keywords,
//! function calls) and claims byte ranges; a later tier can never claim
//! text an earlier tier already owns. [`highlight`] then renders the
//! finished span list to markup in one pass, so no matcher ever sees
//! generated markup.

mod markup;
mod tiers;

use std::ops::Range;

use serde::Serialize;

use crate::language::Language;

pub use markup::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightClass {
    Keyword,
    String,
    Number,
    Comment,
    Builtin,
    Function,
}

impl HighlightClass {
    pub fn css_class(self) -> &'static str {
        match self {
            HighlightClass::Keyword => "keyword",
            HighlightClass::String => "string",
            HighlightClass::Number => "number",
            HighlightClass::Comment => "comment",
            HighlightClass::Builtin => "builtin",
            HighlightClass::Function => "function",
        }
    }
}

/// A classified byte range of the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub range: Range<usize>,
    pub class: HighlightClass,
}

/// Claimed ranges, kept sorted by start.
#[derive(Default)]
struct Claims {
    spans: Vec<Span>,
}

impl Claims {
    fn first_ending_after(&self, pos: usize) -> usize {
        self.spans.partition_point(|s| s.range.end <= pos)
    }

    /// End of the claim covering `pos`, if any.
    fn covering(&self, pos: usize) -> Option<usize> {
        let idx = self.first_ending_after(pos);
        self.spans
            .get(idx)
            .filter(|s| s.range.start <= pos)
            .map(|s| s.range.end)
    }

    fn try_claim(&mut self, range: Range<usize>, class: HighlightClass) -> bool {
        if range.is_empty() {
            return false;
        }
        let idx = self.first_ending_after(range.start);
        if let Some(next) = self.spans.get(idx) {
            if next.range.start < range.end {
                return false;
            }
        }
        self.spans.insert(idx, Span { range, class });
        true
    }
}

fn next_char_boundary(source: &str, pos: usize) -> usize {
    source[pos..]
        .chars()
        .next()
        .map_or(source.len() + 1, |c| pos + c.len_utf8())
}

/// Non-overlapping spans of `source`, sorted by start.
pub fn tokenize(source: &str, language: Language) -> Vec<Span> {
    let mut claims = Claims::default();

    for tier in tiers::tiers(language) {
        let mut at = 0;
        while at <= source.len() {
            let Some(caps) = tier.pattern.captures_at(source, at) else {
                break;
            };
            let Some(whole) = caps.get(0) else { break };

            let claimed = tier
                .candidate(&caps)
                .is_some_and(|(range, class)| claims.try_claim(range, class));

            at = if claimed && !whole.is_empty() {
                whole.end()
            } else if let Some(end) = claims.covering(whole.start()) {
                end.max(next_char_boundary(source, whole.start()))
            } else {
                next_char_boundary(source, whole.start())
            };
        }
    }

    claims.spans
}

/// Markup for `source`: every span wrapped in `<span class="...">`, all
/// text HTML-escaped. Never fails.
pub fn highlight(source: &str, language: Language) -> String {
    render(source, &tokenize(source, language))
}
