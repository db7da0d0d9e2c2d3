//! Chat transcript: commands, replies, sensor readings and notices.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::ChatMessageId;
use crate::time::{Timestamp, now};

/// Who produced a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    /// A command typed or spoken on the dashboard.
    User,
    /// A reply from the controller.
    Bot,
    /// A sensor reading pushed by the controller.
    Sensor,
    /// A notice from homedash itself.
    System,
}

impl fmt::Display for ChatSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("You"),
            Self::Bot => f.write_str("Bot"),
            Self::Sensor => f.write_str("Sensor"),
            Self::System => f.write_str("System"),
        }
    }
}

/// One transcript line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub sender: ChatSender,
    pub text: String,
    pub at: Timestamp,
}

impl ChatMessage {
    #[must_use]
    pub fn new(sender: ChatSender, text: impl Into<String>) -> Self {
        Self {
            id: ChatMessageId::new(),
            sender,
            text: text.into(),
            at: now(),
        }
    }
}

/// Bounded transcript; the oldest line is evicted when full.
#[derive(Debug, Clone)]
pub struct ChatLog {
    capacity: usize,
    messages: VecDeque<ChatMessage>,
}

impl ChatLog {
    /// Create an empty log holding at most `capacity` lines (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            messages: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a line, evicting the oldest one if the log is full.
    pub fn push(&mut self, message: ChatMessage) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Lines from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    /// The newest `limit` lines, oldest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<ChatMessage> {
        let skip = self.messages.len().saturating_sub(limit);
        self.messages.iter().skip(skip).cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
