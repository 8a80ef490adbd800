use std::io::{self, BufRead, Read, Write};

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::message::{
    EditArguments, InsertIndentArguments, Message, MessageContent, SwitchLanguageArguments,
};
use crate::error::{Error, Result};
use crate::highlight;
use crate::language::Language;
use crate::passthrough::SurfaceHost;
use crate::session::{RunOutcome, Session};

const CONTENT_LENGTH: &str = "Content-Length:";
const MAX_MESSAGE_BYTES: usize = 16 * 1024 * 1024;

/// Request/response server speaking `Content-Length` framed JSON.
pub struct Server<R, W, H> {
    seq: u64,
    reader: R,
    writer: W,
    session: Session<H>,
}

impl<R: BufRead, W: Write, H: SurfaceHost> Server<R, W, H> {
    pub fn new(reader: R, writer: W, session: Session<H>) -> Self {
        Self {
            seq: 0,
            reader,
            writer,
            session,
        }
    }

    pub fn session(&self) -> &Session<H> {
        &self.session
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    pub fn send_response(
        &mut self,
        request_seq: u64,
        command: &str,
        success: bool,
        message: Option<String>,
        body: Option<Value>,
    ) -> Result<()> {
        let msg = Message {
            seq: self.next_seq(),
            msg_type: "response".to_string(),
            content: MessageContent::Response {
                request_seq,
                success,
                command: command.to_string(),
                message,
                body,
            },
        };
        self.send_message(&msg)
    }

    pub fn send_event(&mut self, event: &str, body: Option<Value>) -> Result<()> {
        let msg = Message {
            seq: self.next_seq(),
            msg_type: "event".to_string(),
            content: MessageContent::Event {
                event: event.to_string(),
                body,
            },
        };
        self.send_message(&msg)
    }

    fn send_message(&mut self, msg: &Message) -> Result<()> {
        let json = serde_json::to_string(msg)?;
        write!(self.writer, "Content-Length: {}\r\n\r\n{}", json.len(), json)?;
        self.writer.flush()?;
        debug!(bytes = json.len(), "sent message");
        Ok(())
    }

    /// Read one framed message; `Ok(None)` at end of input.
    ///
    /// A frame with an unreadable or oversized `Content-Length` is consumed
    /// up to its header terminator and reported as [`Error::Protocol`]. Junk
    /// left in front of the next header is skipped.
    pub fn read_message(&mut self) -> Result<Option<Message>> {
        let mut content_length = None;
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                if content_length.is_some() {
                    break;
                }
                continue;
            }
            if let Some(at) = line.find(CONTENT_LENGTH) {
                if at > 0 {
                    debug!(skipped = at, "skipping bytes before header");
                }
                let value = line[at + CONTENT_LENGTH.len()..].trim();
                content_length = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| format!("bad Content-Length '{}'", value)),
                );
            }
        }

        let length = match content_length {
            Some(Ok(length)) => length,
            Some(Err(message)) => return Err(Error::Protocol(message)),
            None => return Ok(None),
        };
        if length > MAX_MESSAGE_BYTES {
            io::copy(&mut (&mut self.reader).take(length as u64), &mut io::sink())?;
            return Err(Error::Protocol(format!(
                "message of {} bytes exceeds the {} byte limit",
                length, MAX_MESSAGE_BYTES
            )));
        }

        let mut buffer = vec![0u8; length];
        self.reader.read_exact(&mut buffer)?;
        Ok(Some(serde_json::from_slice(&buffer)?))
    }

    fn arguments<T: DeserializeOwned>(arguments: Option<Value>) -> Result<T> {
        Ok(serde_json::from_value(arguments.unwrap_or(Value::Null))?)
    }

    /// Handle one request. Returns `false` once the client disconnects.
    pub fn handle(&mut self, seq: u64, command: &str, arguments: Option<Value>) -> Result<bool> {
        debug!(seq, command, "handling request");
        match command {
            "initialize" => {
                let languages: Vec<&str> = Language::ALL.iter().map(|l| l.tag()).collect();
                let config = self.session.config();
                let body = json!({
                    "languages": languages,
                    "language": self.session.state().language,
                    "runDelayMs": config.run_delay_ms,
                    "indent": config.indent,
                });
                self.send_response(seq, command, true, None, Some(body))?;
                self.send_event("initialized", None)?;
            }
            "run" => self.handle_run(seq, command)?,
            "clear" => {
                self.session.clear();
                self.send_response(seq, command, true, None, None)?;
            }
            "switchLanguage" => {
                let args: SwitchLanguageArguments = Self::arguments(arguments)?;
                self.session.switch_language(args.language);
                let state = self.session.state();
                let body = json!({"language": state.language, "source": state.source});
                self.send_response(seq, command, true, None, Some(body))?;
            }
            "edit" => {
                let args: EditArguments = Self::arguments(arguments)?;
                self.session.edit(args.text);
                self.send_response(seq, command, true, None, None)?;
            }
            "insertIndent" => {
                let args: InsertIndentArguments = Self::arguments(arguments)?;
                let cursor = self
                    .session
                    .insert_indent(args.start, args.end.unwrap_or(args.start));
                let body = json!({"cursor": cursor, "source": self.session.state().source});
                self.send_response(seq, command, true, None, Some(body))?;
            }
            "highlight" => {
                let state = self.session.state();
                let spans = highlight::tokenize(&state.source, state.language);
                let body = json!({"markup": self.session.highlight(), "spans": spans});
                self.send_response(seq, command, true, None, Some(body))?;
            }
            "state" => {
                let body = serde_json::to_value(self.session.state())?;
                self.send_response(seq, command, true, None, Some(body))?;
            }
            "disconnect" => {
                self.send_response(seq, command, true, None, None)?;
                return Ok(false);
            }
            _ => {
                warn!(command, "unhandled command");
                let message = format!("unknown command '{}'", command);
                self.send_response(seq, command, false, Some(message), None)?;
            }
        }
        Ok(true)
    }

    fn handle_run(&mut self, seq: u64, command: &str) -> Result<()> {
        let body = match self.session.run()? {
            Some(RunOutcome::Log(log)) => {
                let entries = serde_json::to_value(&log)?;
                self.send_response(seq, command, true, None, Some(json!({"log": entries})))?;
                return self.send_event("output", Some(json!({"log": entries})));
            }
            Some(RunOutcome::Surface(id)) => json!({
                "surface": id.0,
                "document": self.session.state().source,
            }),
            Some(RunOutcome::Cancelled) | None => json!({"cancelled": true}),
        };
        self.send_response(seq, command, true, None, Some(body))
    }

    /// Serve until the client disconnects or input ends.
    pub fn serve(&mut self) -> Result<()> {
        info!("protocol server started");
        loop {
            let msg = match self.read_message() {
                Ok(Some(msg)) => msg,
                Ok(None) => break,
                Err(e @ (Error::Json(_) | Error::Protocol(_))) => {
                    warn!("dropping malformed message: {}", e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let MessageContent::Request { command, arguments } = msg.content else {
                debug!(seq = msg.seq, "ignoring non-request message");
                continue;
            };

            match self.handle(msg.seq, &command, arguments) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e @ (Error::Json(_) | Error::UnknownLanguage(_))) => {
                    self.send_response(msg.seq, &command, false, Some(e.to_string()), None)?;
                }
                Err(e) => return Err(e),
            }
        }
        info!("protocol server stopped");
        Ok(())
    }
}
