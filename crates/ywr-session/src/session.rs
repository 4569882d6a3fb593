//! Caller-facing session handle.

use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tracing::debug;

use crate::connection::connection_loop;
use crate::context::SessionContext;
use crate::protocol::PromptMessage;
use crate::transcript::{Transcript, TranscriptEntry};
use crate::types::{ConnectionState, SessionCommand, SessionConfig, SessionError, SessionEvent};

/// Handle for one user's chat session.
///
/// Owns the transcript and at most one background connection task. All
/// methods are non-blocking; inbound traffic is delivered through the
/// event receiver returned by [`connect`](Self::connect).
pub struct ChatSession {
    context: SessionContext,
    config: SessionConfig,
    state: Arc<RwLock<ConnectionState>>,
    transcript: Arc<RwLock<Transcript>>,
    command_tx: Option<mpsc::Sender<SessionCommand>>,
}

impl ChatSession {
    pub fn new(context: SessionContext, config: SessionConfig) -> Self {
        Self {
            context,
            config,
            state: Arc::new(RwLock::new(ConnectionState::Disconnected)),
            transcript: Arc::new(RwLock::new(Transcript::new())),
            command_tx: None,
        }
    }

    /// Start the connection and its background receive loop.
    ///
    /// Returns the event receiver for this connection attempt. Handshake
    /// success or failure arrives asynchronously as the first event
    /// (`Connected` or `ConnectionFailed`).
    ///
    /// Calling this while the session is already connecting or open is an
    /// error; the existing receive loop keeps running. Connecting again
    /// after a close reuses the transcript, only `clear_transcript`
    /// empties it.
    pub async fn connect(&mut self) -> Result<mpsc::Receiver<SessionEvent>, SessionError> {
        {
            let mut state = self.state.write().await;
            if matches!(*state, ConnectionState::Connecting | ConnectionState::Open) {
                return Err(SessionError::AlreadyConnected);
            }
            *state = ConnectionState::Connecting;
        }

        let (event_tx, event_rx) = mpsc::channel(256);
        let (command_tx, command_rx) = mpsc::channel(64);
        self.command_tx = Some(command_tx);

        tokio::spawn(connection_loop(
            self.config.clone(),
            Arc::clone(&self.state),
            Arc::clone(&self.transcript),
            event_tx,
            command_rx,
        ));

        Ok(event_rx)
    }

    /// Send a prompt to the chat endpoint.
    ///
    /// Known limitation, kept from the original behavior: when the session
    /// is not open the prompt is silently dropped. No error is surfaced
    /// and no transcript entry is made.
    pub async fn send(&self, prompt: &str) {
        if *self.state.read().await != ConnectionState::Open {
            debug!("send while not connected, dropping prompt");
            return;
        }
        if let Some(tx) = &self.command_tx {
            let _ = tx.send(SessionCommand::Send(PromptMessage::new(prompt))).await;
        }
    }

    /// Close the connection. Idempotent; safe to call when already closed.
    pub async fn disconnect(&self) {
        if let Some(tx) = &self.command_tx {
            let _ = tx.send(SessionCommand::Disconnect).await;
        }
    }

    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    pub async fn is_connected(&self) -> bool {
        *self.state.read().await == ConnectionState::Open
    }

    /// Owned copy of the transcript for rendering.
    pub async fn transcript_snapshot(&self) -> Vec<TranscriptEntry> {
        self.transcript.read().await.snapshot()
    }

    pub async fn transcript_len(&self) -> usize {
        self.transcript.read().await.len()
    }

    /// Drop all transcript entries.
    pub async fn clear_transcript(&self) {
        self.transcript.write().await.clear();
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }
}
