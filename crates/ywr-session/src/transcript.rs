//! Append-only transcript of sent prompts and received answers.

use serde::{Deserialize, Serialize};

use crate::protocol::{AnswerMessage, PromptMessage};

/// Which side produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

/// The message body of a transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPayload {
    Prompt(PromptMessage),
    Answer(AnswerMessage),
}

/// One record per exchanged message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Wall-clock capture time, display only.
    pub timestamp: String,
    pub direction: Direction,
    pub payload: EntryPayload,
}

impl TranscriptEntry {
    pub fn sent(msg: PromptMessage) -> Self {
        Self {
            timestamp: now_timestamp(),
            direction: Direction::Sent,
            payload: EntryPayload::Prompt(msg),
        }
    }

    pub fn received(msg: AnswerMessage) -> Self {
        Self {
            timestamp: now_timestamp(),
            direction: Direction::Received,
            payload: EntryPayload::Answer(msg),
        }
    }

    /// The text the front-end renders for this entry.
    pub fn display_text(&self) -> &str {
        match &self.payload {
            EntryPayload::Prompt(p) => &p.prompt,
            EntryPayload::Answer(a) => &a.answer,
        }
    }
}

/// Current wall-clock time as "HH:MM:SS".
fn now_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// In-memory transcript for one session.
///
/// Entries are appended in the order they are observed locally and never
/// reordered. The transcript survives a reconnect; only `clear` empties it.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_sent(&mut self, msg: PromptMessage) {
        self.entries.push(TranscriptEntry::sent(msg));
    }

    pub fn push_received(&mut self, msg: AnswerMessage) {
        self.entries.push(TranscriptEntry::received(msg));
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Owned copy for the rendering side.
    pub fn snapshot(&self) -> Vec<TranscriptEntry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
