//! A workbench that pretends to compile and run code.
//!
//! Python and Java are "run" by scanning the source for print statements
//! and synthesizing a log; HTML is handed to an embedded surface. Both the
//! simulated trace and the syntax highlighting are pure text analysis.

pub mod config;
pub mod error;
pub mod highlight;
pub mod language;
pub mod log;
pub mod passthrough;
pub mod protocol;
pub mod session;
pub mod simulate;

pub use error::{Error, Result};
pub use language::Language;
