//! Wire protocol for the chat endpoint.
//!
//! Outbound frames are `{"action": "sendmessage", "prompt": <string>}`;
//! inbound frames are JSON objects expected to carry an `"answer"` field,
//! read permissively.

use serde::{Deserialize, Serialize};

/// Routing action understood by the chat endpoint.
pub const SEND_MESSAGE_ACTION: &str = "sendmessage";

/// An outbound prompt frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub action: String,
    pub prompt: String,
}

impl PromptMessage {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            action: SEND_MESSAGE_ACTION.to_string(),
            prompt: prompt.into(),
        }
    }
}

/// An inbound answer frame.
///
/// A missing `answer` field defaults to empty; unrecognized fields are
/// retained so the front-end can render richer payloads later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerMessage {
    #[serde(default)]
    pub answer: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
