use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

/// One message in the conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub content: String,
    /// Insertion order, starting at zero.
    pub ordinal: usize,
    pub at: DateTime<Utc>,
}

/// Append-only conversation log.
///
/// Turns are never reordered or mutated after creation. The transcript lives
/// for one `Conversation` phase and is reset when a new upload restarts the
/// workflow.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, speaker: Speaker, content: String) -> &Turn {
        let turn = Turn {
            speaker,
            content,
            ordinal: self.turns.len(),
            at: Utc::now(),
        };
        self.turns.push(turn);
        self.turns.last().unwrap()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &Turn {
        self.push(Speaker::User, content.into())
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> &Turn {
        self.push(Speaker::Assistant, content.into())
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop every turn. Used when a new document restarts the workflow.
    pub fn reset(&mut self) {
        self.turns.clear();
    }
}
