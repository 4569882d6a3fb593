//! End-to-end session tests against a loopback WebSocket server.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use ywr_session::{
    ChatSession, ConnectionState, Direction, EntryPayload, PromptMessage, SessionConfig,
    SessionContext, SessionError, SessionEvent,
};

const WAIT: Duration = Duration::from_secs(5);

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    (listener, url)
}

fn session_for(url: &str) -> ChatSession {
    ChatSession::new(SessionContext::anonymous("tester"), SessionConfig::new(url))
}

async fn next_event(rx: &mut mpsc::Receiver<SessionEvent>) -> SessionEvent {
    timeout(WAIT, rx.recv())
        .await
        .expect("timed out waiting for session event")
        .expect("event channel closed")
}

async fn wait_for_disconnected(rx: &mut mpsc::Receiver<SessionEvent>) {
    loop {
        if matches!(next_event(rx).await, SessionEvent::Disconnected) {
            break;
        }
    }
}

#[tokio::test]
async fn connect_opens_and_disconnect_closes() {
    let (listener, url) = bind().await;
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        while let Some(msg) = ws.next().await {
            if matches!(msg, Ok(Message::Close(_)) | Err(_)) {
                break;
            }
        }
    });

    let mut session = session_for(&url);
    assert_eq!(session.state().await, ConnectionState::Disconnected);

    let mut events = session.connect().await.unwrap();
    assert!(matches!(next_event(&mut events).await, SessionEvent::Connected));
    assert_eq!(session.state().await, ConnectionState::Open);
    assert!(session.is_connected().await);

    session.disconnect().await;
    wait_for_disconnected(&mut events).await;
    assert_eq!(session.state().await, ConnectionState::Closed);

    // Idempotent: a second disconnect observes the same state.
    session.disconnect().await;
    assert_eq!(session.state().await, ConnectionState::Closed);
    assert_eq!(session.transcript_len().await, 0);

    server.await.unwrap();
}

#[tokio::test]
async fn send_appends_one_entry_and_transmits_wire_bytes() {
    let (listener, url) = bind().await;
    let (frame_tx, mut frame_rx) = mpsc::channel::<String>(8);
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        while let Some(msg) = ws.next().await {
            match msg {
                Ok(Message::Text(text)) => frame_tx.send(text.to_string()).await.unwrap(),
                Ok(Message::Close(_)) | Err(_) => break,
                _ => {}
            }
        }
    });

    let mut session = session_for(&url);
    let mut events = session.connect().await.unwrap();
    assert!(matches!(next_event(&mut events).await, SessionEvent::Connected));

    session.send("hi").await;
    match next_event(&mut events).await {
        SessionEvent::Sent(msg) => assert_eq!(msg, PromptMessage::new("hi")),
        other => panic!("unexpected event: {other:?}"),
    }

    let entries = session.transcript_snapshot().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].direction, Direction::Sent);
    let sent = match &entries[0].payload {
        EntryPayload::Prompt(p) => p.clone(),
        other => panic!("unexpected payload: {other:?}"),
    };
    assert_eq!(sent.prompt, "hi");

    // Round-trip: the transcript payload re-serialized equals the bytes
    // the server actually received.
    let wire = timeout(WAIT, frame_rx.recv()).await.unwrap().unwrap();
    assert_eq!(wire, serde_json::to_string(&sent).unwrap());
    assert_eq!(wire, r#"{"action":"sendmessage","prompt":"hi"}"#);

    session.disconnect().await;
    wait_for_disconnected(&mut events).await;
    server.await.unwrap();
}

#[tokio::test]
async fn received_frames_append_in_delivery_order() {
    let (listener, url) = bind().await;
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.send(Message::Text(r#"{"answer":"one"}"#.into())).await.unwrap();
        ws.send(Message::Text("{ not json".into())).await.unwrap();
        ws.send(Message::Text("42".into())).await.unwrap();
        ws.send(Message::Binary(vec![0xff, 0xfe].into())).await.unwrap();
        ws.send(Message::Text(r#"{"answer":"two"}"#.into())).await.unwrap();
        ws.send(Message::Text(r#"{"status":"done"}"#.into())).await.unwrap();
        while let Some(msg) = ws.next().await {
            if matches!(msg, Ok(Message::Close(_)) | Err(_)) {
                break;
            }
        }
    });

    let mut session = session_for(&url);
    let mut events = session.connect().await.unwrap();
    assert!(matches!(next_event(&mut events).await, SessionEvent::Connected));

    let mut answers = Vec::new();
    while answers.len() < 3 {
        if let SessionEvent::Received(msg) = next_event(&mut events).await {
            answers.push(msg.answer.clone());
        }
    }
    // One entry per parsed frame, in delivery order; the missing-field
    // frame defaults to an empty answer.
    assert_eq!(answers, ["one", "two", ""]);

    // Malformed and non-text frames never landed in the transcript.
    let entries = session.transcript_snapshot().await;
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.direction == Direction::Received));

    session.disconnect().await;
    wait_for_disconnected(&mut events).await;
    server.await.unwrap();
}

#[tokio::test]
async fn double_connect_is_an_error() {
    let (listener, url) = bind().await;
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        while let Some(msg) = ws.next().await {
            if matches!(msg, Ok(Message::Close(_)) | Err(_)) {
                break;
            }
        }
    });

    let mut session = session_for(&url);
    let mut events = session.connect().await.unwrap();

    // The guard holds even while the handshake is still in flight.
    assert!(matches!(
        session.connect().await,
        Err(SessionError::AlreadyConnected)
    ));

    assert!(matches!(next_event(&mut events).await, SessionEvent::Connected));
    assert!(matches!(
        session.connect().await,
        Err(SessionError::AlreadyConnected)
    ));

    session.disconnect().await;
    wait_for_disconnected(&mut events).await;
    server.await.unwrap();
}

#[tokio::test]
async fn server_close_moves_to_closed_and_reconnect_reuses_transcript() {
    let (listener, url) = bind().await;
    let server = tokio::spawn(async move {
        // First connection: read one prompt, then close.
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(_))) => break,
                Some(Ok(_)) => {}
                other => panic!("expected a text frame, got {other:?}"),
            }
        }
        ws.close(None).await.unwrap();
        while let Some(msg) = ws.next().await {
            if msg.is_err() {
                break;
            }
        }

        // Second connection from the same session handle.
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        while let Some(msg) = ws.next().await {
            if matches!(msg, Ok(Message::Close(_)) | Err(_)) {
                break;
            }
        }
    });

    let mut session = session_for(&url);
    let mut events = session.connect().await.unwrap();
    assert!(matches!(next_event(&mut events).await, SessionEvent::Connected));

    session.send("hi").await;
    wait_for_disconnected(&mut events).await;
    assert_eq!(session.state().await, ConnectionState::Closed);
    assert_eq!(session.transcript_len().await, 1);

    // Send while closed: silently dropped, transcript untouched.
    session.send("lost").await;
    assert_eq!(session.transcript_len().await, 1);

    // Reconnecting creates a fresh transport but keeps the transcript.
    let mut events = session.connect().await.unwrap();
    assert!(matches!(next_event(&mut events).await, SessionEvent::Connected));
    assert_eq!(session.transcript_len().await, 1);

    session.clear_transcript().await;
    assert_eq!(session.transcript_len().await, 0);

    session.disconnect().await;
    wait_for_disconnected(&mut events).await;
    server.await.unwrap();
}

#[tokio::test]
async fn connection_failure_is_reported_and_closes() {
    let (listener, url) = bind().await;
    drop(listener);

    let mut session = session_for(&url);
    let mut events = session.connect().await.unwrap();
    match next_event(&mut events).await {
        SessionEvent::ConnectionFailed(reason) => assert!(!reason.is_empty()),
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(session.state().await, ConnectionState::Closed);
    assert_eq!(session.transcript_len().await, 0);

    // The caller may try again after a failure.
    assert!(session.connect().await.is_ok());
}
