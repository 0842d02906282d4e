use serde::Serialize;

use crate::error::ChatError;
use crate::message::{Message, MessageId};

/// Deleted messages, most recently deleted on top.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UndoStack {
    // Top of stack is the last element.
    entries: Vec<Message>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push onto the top. Any older entry for the same id is dropped first,
    /// so each message appears at most once.
    pub fn push(&mut self, message: Message) {
        self.entries.retain(|m| m.id != message.id);
        self.entries.push(message);
    }

    pub fn pop(&mut self) -> Result<Message, ChatError> {
        self.entries.pop().ok_or(ChatError::EmptyStack)
    }

    pub fn peek(&self) -> Option<&Message> {
        self.entries.last()
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.entries.iter().any(|m| m.id == id)
    }

    /// Entries from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
