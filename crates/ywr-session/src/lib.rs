//! Session connection manager for the YWR chat front-end.
//!
//! Owns the single long-lived WebSocket connection to the chat endpoint.
//! `ChatSession` is the caller-facing handle; the receive loop runs on a
//! background tokio task, appends every exchanged message to an append-only
//! transcript, and pushes `SessionEvent`s to the front-end over a channel
//! so no polling loop is needed.

mod connection;

pub mod context;
pub mod protocol;
pub mod session;
pub mod transcript;
pub mod types;

pub use context::SessionContext;
pub use protocol::{AnswerMessage, PromptMessage};
pub use session::ChatSession;
pub use transcript::{Direction, EntryPayload, Transcript, TranscriptEntry};
pub use types::{ConnectionState, SessionConfig, SessionError, SessionEvent};
