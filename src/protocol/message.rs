use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::language::Language;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub seq: u64,
    #[serde(rename = "type")]
    pub msg_type: String,
    #[serde(flatten)]
    pub content: MessageContent,
}

/// Body of a message. Variants are tried in order, so the ones with more
/// required fields come first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Response {
        request_seq: u64,
        success: bool,
        command: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<Value>,
    },
    Event {
        event: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<Value>,
    },
    Request {
        command: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        arguments: Option<Value>,
    },
}

#[derive(Debug, Deserialize)]
pub struct SwitchLanguageArguments {
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct EditArguments {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct InsertIndentArguments {
    pub start: usize,
    /// End of the selection; defaults to `start` (plain caret).
    #[serde(default)]
    pub end: Option<usize>,
}
