use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::warn;

use super::HighlightClass;
use crate::language::{vocabulary, Language};

// ASCII word boundaries throughout: `é1` still highlights the `1`.
const STRING_LITERALS: &str = r#"(?-u:\b)f"(?:[^"\\]|\\.)*"|"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'"#;
const NUMBER: &str = r"(?-u:\b)[0-9]+\.?[0-9]*(?-u:\b)";
const FUNCTION_CALL: &str = r"(?-u:\b)([a-zA-Z_][a-zA-Z0-9_]*)\s*\(";

#[derive(Debug, Clone, Copy)]
enum TierKind {
    /// `comment` / `string` named groups; whichever starts first wins.
    CommentOrString,
    Whole(HighlightClass),
    /// Only capture group 1 is spanned.
    FunctionName,
}

/// One precedence level of the tokenizer.
pub(super) struct Tier {
    pub(super) pattern: Regex,
    kind: TierKind,
}

impl Tier {
    /// Span candidate for a match of this tier.
    pub(super) fn candidate(&self, caps: &Captures<'_>) -> Option<(std::ops::Range<usize>, HighlightClass)> {
        match self.kind {
            TierKind::CommentOrString => {
                if let Some(m) = caps.name("comment") {
                    Some((m.range(), HighlightClass::Comment))
                } else {
                    caps.name("string").map(|m| (m.range(), HighlightClass::String))
                }
            }
            TierKind::Whole(class) => caps.get(0).map(|m| (m.range(), class)),
            TierKind::FunctionName => caps.get(1).map(|m| (m.range(), HighlightClass::Function)),
        }
    }
}

fn comment_patterns(language: Language) -> &'static str {
    match language {
        Language::Python => r#"#[^\n]*|"""[\s\S]*?""""#,
        Language::Java => r"//[^\n]*|/\*[\s\S]*?\*/",
        Language::Html => r"<!--[\s\S]*?-->",
    }
}

fn word_pattern(words: &[&str]) -> Option<String> {
    if words.is_empty() {
        return None;
    }
    let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    Some(format!(r"(?-u:\b)(?:{})(?-u:\b)", alternatives.join("|")))
}

fn build(language: Language) -> Vec<Tier> {
    let table = vocabulary(language);
    let sources = [
        (
            Some(format!(
                "(?P<comment>{})|(?P<string>{})",
                comment_patterns(language),
                STRING_LITERALS
            )),
            TierKind::CommentOrString,
        ),
        (Some(NUMBER.to_string()), TierKind::Whole(HighlightClass::Number)),
        (word_pattern(table.builtins), TierKind::Whole(HighlightClass::Builtin)),
        (word_pattern(table.keywords), TierKind::Whole(HighlightClass::Keyword)),
        (Some(FUNCTION_CALL.to_string()), TierKind::FunctionName),
    ];

    let mut tiers = Vec::with_capacity(sources.len());
    for (source, kind) in sources {
        let Some(source) = source else { continue };
        match Regex::new(&source) {
            Ok(pattern) => tiers.push(Tier { pattern, kind }),
            Err(e) => warn!(%language, ?kind, "skipping highlight tier: {}", e),
        }
    }
    tiers
}

static PYTHON: LazyLock<Vec<Tier>> = LazyLock::new(|| build(Language::Python));
static JAVA: LazyLock<Vec<Tier>> = LazyLock::new(|| build(Language::Java));
static HTML: LazyLock<Vec<Tier>> = LazyLock::new(|| build(Language::Html));

/// Tiers for `language`, highest priority first.
pub(super) fn tiers(language: Language) -> &'static [Tier] {
    match language {
        Language::Python => &PYTHON,
        Language::Java => &JAVA,
        Language::Html => &HTML,
    }
}
