//! # Transcript
//!
//! The conversation as the user sees it: an append-only list of [`Message`]s.
//!
//! ```text
//! Transcript
//! └── messages: Vec<Message>
//!     ├── Message { speaker: User, content, timestamp }
//!     └── Message { speaker: Bot,  content, timestamp, mood?, recommendations? }
//! ```
//!
//! `push` is the only mutation. Messages are handed out by shared reference,
//! so nothing can reorder or edit them once they are in.

use chrono::Local;

use crate::backend::{ChatReply, Mood, Recommendation};

/// Shown in place of a reply whenever the request fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

impl Speaker {
    /// Header label on the message card.
    pub fn label(self) -> &'static str {
        match self {
            Speaker::User => "You",
            Speaker::Bot => "StreamSmart AI",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub speaker: Speaker,
    pub content: String,
    /// Local wall-clock time at creation, already formatted for display.
    pub timestamp: String,
    /// `None` for user messages and failed requests.
    pub recommendations: Option<Vec<Recommendation>>,
    pub mood: Option<Mood>,
}

fn now_label() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            content: content.into(),
            timestamp: now_label(),
            recommendations: None,
            mood: None,
        }
    }

    /// Builds the bot message for a successful reply. Recommendation order is kept as received.
    pub fn reply(reply: ChatReply) -> Self {
        Self {
            speaker: Speaker::Bot,
            content: reply.message,
            timestamp: now_label(),
            recommendations: Some(reply.recommendations),
            mood: reply.extracted_mood,
        }
    }

    pub fn fallback() -> Self {
        Self {
            speaker: Speaker::Bot,
            content: FALLBACK_REPLY.to_string(),
            timestamp: now_label(),
            recommendations: None,
            mood: None,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
