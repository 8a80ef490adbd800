//! Stdio protocol for driving a session from a separate UI process.

mod message;
mod server;

use std::io;

use crate::config::Config;
use crate::error::Result;
use crate::session::Session;

pub use message::{
    EditArguments, InsertIndentArguments, Message, MessageContent, SwitchLanguageArguments,
};
pub use server::Server;

/// Serve a fresh session over stdin/stdout.
pub fn run_protocol_mode(config: Config) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut server = Server::new(stdin.lock(), stdout.lock(), Session::with_memory_host(config));
    server.serve()
}
