//! Configuration, state, and event/command enums for the chat session.

use crate::protocol::{AnswerMessage, PromptMessage};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the session connection.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// WebSocket endpoint, e.g. "wss://example.execute-api.us-east-1.amazonaws.com/prod".
    pub url: String,
    /// Handshake timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl SessionConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout_secs: 15,
        }
    }
}

// ---------------------------------------------------------------------------
// Connection state
// ---------------------------------------------------------------------------

/// Lifecycle state of the underlying transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Open,
    Closed,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// `connect()` was called on a handle that is already connecting or
    /// open. A second call would leak a second receive loop.
    #[error("session already connected")]
    AlreadyConnected,
}

// ---------------------------------------------------------------------------
// Events & Commands
// ---------------------------------------------------------------------------

/// Events pushed from the connection task to the front-end.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Handshake succeeded; the session is open.
    Connected,
    /// Handshake failed; the session is closed. No automatic retry.
    ConnectionFailed(String),
    /// A prompt was transmitted and appended to the transcript.
    Sent(PromptMessage),
    /// An answer frame arrived and was appended to the transcript.
    Received(AnswerMessage),
    /// Transport fault. The connection is about to close.
    Error(String),
    /// The connection ended (explicit disconnect, server close, or fault).
    Disconnected,
}

/// Commands sent from the session handle to the connection task.
#[derive(Debug)]
pub(crate) enum SessionCommand {
    Send(PromptMessage),
    Disconnect,
}
