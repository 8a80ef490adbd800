mod samples;
mod vocabulary;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub use samples::sample;
pub use vocabulary::{vocabulary, VocabularyTable};

/// The closed set of languages the workbench knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
    Java,
    Html,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Python, Language::Java, Language::Html];

    pub fn tag(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::Html => "html",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Html => "HTML",
        }
    }

    /// Markup is rendered by an embedded surface instead of being simulated.
    pub fn is_markup(self) -> bool {
        matches!(self, Language::Html)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "html" | "htm" => Ok(Language::Html),
            _ => Err(Error::UnknownLanguage(s.to_string())),
        }
    }
}
