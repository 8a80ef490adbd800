use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::language::Language;

pub const CONFIG_ENV: &str = "FAKE_COMPILER_CONFIG";

/// Workbench settings, read from an optional TOML file.
///
/// ```toml
/// run_delay_ms = 100
/// indent = "    "
/// language = "java"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Pause before a run executes, so the host can show a busy indicator.
    pub run_delay_ms: u64,
    pub indent: String,
    /// Language selected at startup.
    pub language: Language,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run_delay_ms: 100,
            indent: "    ".to_string(),
            language: Language::Python,
        }
    }
}

impl Config {
    pub fn run_delay(&self) -> Duration {
        Duration::from_millis(self.run_delay_ms)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load from `explicit`, else from `$FAKE_COMPILER_CONFIG`, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }
}
