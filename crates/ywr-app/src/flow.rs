//! Login, registration, and chat loops.

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

use ywr_auth::{AuthTokens, CognitoClient, CognitoConfig, IdentityProvider};
use ywr_common::{Result, YwrError};
use ywr_config::AppConfig;
use ywr_session::{
    ChatSession, Direction, SessionConfig, SessionContext, SessionEvent, TranscriptEntry,
};

type Input = Lines<BufReader<Stdin>>;

fn provider_for(config: &AppConfig) -> CognitoClient {
    CognitoClient::new(CognitoConfig::new(
        &config.auth.region,
        &config.auth.user_pool_id,
        &config.auth.client_id,
    ))
}

fn stdin_lines() -> Input {
    BufReader::new(tokio::io::stdin()).lines()
}

async fn prompt(input: &mut Input, label: &str) -> Result<String> {
    use std::io::Write as _;
    print!("{label}");
    std::io::stdout().flush()?;
    match input.next_line().await? {
        Some(line) => Ok(line.trim().to_string()),
        None => Err(YwrError::Other("stdin closed".into())),
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Account creation: register, then confirm with the emailed code.
pub async fn register(config: &AppConfig) -> Result<()> {
    let provider = provider_for(config);
    let mut input = stdin_lines();

    let username = prompt(&mut input, "Email: ").await?;
    let password = prompt(&mut input, "Password: ").await?;
    provider
        .register(&username, &password)
        .await
        .map_err(|e| YwrError::Auth(e.to_string()))?;
    println!("Registration successful! Check your email for the confirmation code.");

    let code = prompt(&mut input, "Confirmation code: ").await?;
    provider
        .confirm(&username, &code)
        .await
        .map_err(|e| YwrError::Auth(e.to_string()))?;
    println!("Confirmation successful! You can now log in.");
    Ok(())
}

// ---------------------------------------------------------------------------
// Login + chat
// ---------------------------------------------------------------------------

async fn login(provider: &dyn IdentityProvider, input: &mut Input) -> Result<(String, AuthTokens)> {
    loop {
        let username = prompt(input, "Username: ").await?;
        let password = prompt(input, "Password: ").await?;
        match provider.authenticate(&username, &password).await {
            Ok(tokens) => {
                println!("Login successful!");
                return Ok((username, tokens));
            }
            Err(e) => eprintln!("Authentication failed: {e}"),
        }
    }
}

/// The main chat loop: authenticate, connect, then relay between stdin
/// and the session until quit or close.
pub async fn chat(config: &AppConfig) -> Result<()> {
    let provider = provider_for(config);
    let mut input = stdin_lines();

    let (username, tokens) = login(&provider, &mut input).await?;
    let context = SessionContext::authenticated(username, tokens.id_token);
    debug!(?context, "session context created");

    let mut session_config = SessionConfig::new(config.chat.ws_url.clone());
    session_config.connect_timeout_secs = config.chat.connect_timeout_secs;

    let mut session = ChatSession::new(context, session_config);
    let mut events = session
        .connect()
        .await
        .map_err(|e| YwrError::Session(e.to_string()))?;

    match events.recv().await {
        Some(SessionEvent::Connected) => {}
        Some(SessionEvent::ConnectionFailed(reason)) => return Err(YwrError::Network(reason)),
        other => {
            return Err(YwrError::Session(format!(
                "unexpected session event: {other:?}"
            )))
        }
    }

    println!("Logged in as: {}", session.context().username);
    println!("Type a prompt and press enter. Commands: /history, /clear, /quit");

    // Incoming answers are pushed here; no refresh polling.
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::Received(answer) => println!("Assistant: {}", answer.answer),
                SessionEvent::Sent(msg) => println!("You: {}", msg.prompt),
                SessionEvent::Error(e) => eprintln!("connection error: {e}"),
                SessionEvent::Disconnected => {
                    println!("connection closed");
                    break;
                }
                _ => {}
            }
        }
    });

    while let Some(line) = input.next_line().await? {
        match parse_input(&line) {
            Command::Quit => break,
            Command::Clear => session.clear_transcript().await,
            Command::History => {
                for entry in session.transcript_snapshot().await {
                    println!("{}", format_entry(&entry));
                }
            }
            Command::Empty => {}
            Command::Prompt(text) => session.send(&text).await,
        }
        if !session.is_connected().await {
            break;
        }
    }

    session.disconnect().await;
    let _ = printer.await;
    Ok(())
}

// ---------------------------------------------------------------------------
// Input parsing & rendering
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
enum Command {
    Prompt(String),
    Quit,
    Clear,
    History,
    Empty,
}

fn parse_input(line: &str) -> Command {
    match line.trim() {
        "" => Command::Empty,
        "/quit" | "/exit" => Command::Quit,
        "/clear" => Command::Clear,
        "/history" => Command::History,
        text => Command::Prompt(text.to_string()),
    }
}

fn format_entry(entry: &TranscriptEntry) -> String {
    let speaker = match entry.direction {
        Direction::Sent => "You",
        Direction::Received => "Assistant",
    };
    format!("[{}] {}: {}", entry.timestamp, speaker, entry.display_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ywr_session::PromptMessage;

    #[test]
    fn parses_slash_commands() {
        assert_eq!(parse_input("/quit"), Command::Quit);
        assert_eq!(parse_input("/exit"), Command::Quit);
        assert_eq!(parse_input("/clear"), Command::Clear);
        assert_eq!(parse_input("/history"), Command::History);
        assert_eq!(parse_input("  "), Command::Empty);
    }

    #[test]
    fn everything_else_is_a_prompt() {
        assert_eq!(
            parse_input("  what moved rates today?  "),
            Command::Prompt("what moved rates today?".into())
        );
        // Not a recognized command, sent verbatim.
        assert_eq!(parse_input("/h"), Command::Prompt("/h".into()));
    }

    #[test]
    fn formats_sent_entries_with_speaker() {
        let entry = TranscriptEntry::sent(PromptMessage::new("hi"));
        let line = format_entry(&entry);
        assert!(line.contains("You: hi"));
        assert!(line.starts_with('['));
    }
}
