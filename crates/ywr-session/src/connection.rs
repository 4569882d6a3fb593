//! Background WebSocket connection task.
//!
//! One task per `connect()`: performs the handshake with a bounded
//! timeout, then reads inbound frames until the peer closes or a
//! transport fault occurs. There is no reconnect policy; when the loop
//! ends the session is Closed until the caller connects again.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, error, info, warn};

use crate::transcript::Transcript;
use crate::types::{ConnectionState, SessionCommand, SessionConfig, SessionEvent};

// ---------------------------------------------------------------------------
// Connection loop
// ---------------------------------------------------------------------------

/// Background task owning the WebSocket for one connection attempt.
pub(crate) async fn connection_loop(
    config: SessionConfig,
    state: Arc<RwLock<ConnectionState>>,
    transcript: Arc<RwLock<Transcript>>,
    event_tx: mpsc::Sender<SessionEvent>,
    command_rx: mpsc::Receiver<SessionCommand>,
) {
    info!(url = %config.url, "connecting to chat endpoint");

    let connect = tokio::time::timeout(
        Duration::from_secs(config.connect_timeout_secs),
        tokio_tungstenite::connect_async(&config.url),
    )
    .await;

    let ws_stream = match connect {
        Ok(Ok((ws, _response))) => ws,
        Ok(Err(e)) => {
            error!(error = %e, "failed to connect to chat endpoint");
            *state.write().await = ConnectionState::Closed;
            let _ = event_tx
                .send(SessionEvent::ConnectionFailed(e.to_string()))
                .await;
            return;
        }
        Err(_elapsed) => {
            error!(
                timeout = config.connect_timeout_secs,
                "websocket handshake timed out"
            );
            *state.write().await = ConnectionState::Closed;
            let _ = event_tx
                .send(SessionEvent::ConnectionFailed(format!(
                    "handshake timed out after {}s",
                    config.connect_timeout_secs
                )))
                .await;
            return;
        }
    };

    *state.write().await = ConnectionState::Open;
    let _ = event_tx.send(SessionEvent::Connected).await;
    info!("chat connection open");

    let (ws_write, mut ws_read) = ws_stream.split();
    let writer = Arc::new(Mutex::new(ws_write));

    // Outbound traffic runs on its own task so a blocked write never
    // stalls the receive loop.
    let cmd_handle = tokio::spawn(command_forwarder(
        command_rx,
        Arc::clone(&writer),
        Arc::clone(&transcript),
        event_tx.clone(),
    ));

    while let Some(msg_result) = ws_read.next().await {
        match msg_result {
            Ok(WsMessage::Text(text)) => {
                handle_frame(text.as_str(), &transcript, &event_tx).await;
            }
            Ok(WsMessage::Close(_)) => {
                info!("chat endpoint closed the connection");
                break;
            }
            Err(e) => {
                warn!(error = %e, "websocket error");
                let _ = event_tx.send(SessionEvent::Error(e.to_string())).await;
                break;
            }
            _ => {}
        }
    }

    cmd_handle.abort();
    *state.write().await = ConnectionState::Closed;
    let _ = event_tx.send(SessionEvent::Disconnected).await;
}

// ---------------------------------------------------------------------------
// Inbound frames
// ---------------------------------------------------------------------------

/// Parse one inbound frame and append it to the transcript.
///
/// Malformed frames are dropped with a diagnostic; they never take down
/// the receive loop and never touch the transcript.
async fn handle_frame(
    text: &str,
    transcript: &Arc<RwLock<Transcript>>,
    event_tx: &mpsc::Sender<SessionEvent>,
) {
    match serde_json::from_str::<crate::protocol::AnswerMessage>(text) {
        Ok(answer) => {
            debug!(chars = answer.answer.len(), "answer received");
            transcript.write().await.push_received(answer.clone());
            let _ = event_tx.send(SessionEvent::Received(answer)).await;
        }
        Err(e) => {
            warn!(error = %e, "dropping unparseable inbound frame");
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound commands
// ---------------------------------------------------------------------------

/// Drain the command channel, writing prompts to the sink.
///
/// A closed command channel (the session handle was dropped) is treated
/// like an explicit disconnect.
async fn command_forwarder<S>(
    mut command_rx: mpsc::Receiver<SessionCommand>,
    writer: Arc<Mutex<S>>,
    transcript: Arc<RwLock<Transcript>>,
    event_tx: mpsc::Sender<SessionEvent>,
) where
    S: futures_util::Sink<WsMessage> + Unpin,
    S::Error: std::fmt::Display,
{
    loop {
        match command_rx.recv().await {
            Some(SessionCommand::Send(msg)) => {
                let json = match serde_json::to_string(&msg) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!(error = %e, "failed to serialize prompt");
                        continue;
                    }
                };
                let mut w = writer.lock().await;
                match w.send(WsMessage::Text(json.into())).await {
                    Ok(()) => {
                        // The transcript records the pre-serialization message,
                        // and only after the transport accepted the frame.
                        transcript.write().await.push_sent(msg.clone());
                        let _ = event_tx.send(SessionEvent::Sent(msg)).await;
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to transmit prompt");
                        let _ = event_tx.send(SessionEvent::Error(e.to_string())).await;
                        return;
                    }
                }
            }
            Some(SessionCommand::Disconnect) | None => {
                let mut w = writer.lock().await;
                let _ = w.send(WsMessage::Close(None)).await;
                return;
            }
        }
    }
}
