use std::io;

use thiserror::Error;

/// Errors surfaced by the workbench.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown language '{0}' (expected python, java or html)")]
    UnknownLanguage(String),

    /// A print or highlight pattern failed to build.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("protocol error: {0}")]
    Protocol(String),
}

pub type Result<T> = std::result::Result<T, Error>;
