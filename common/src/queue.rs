use serde::Serialize;

use crate::error::ChatError;
use crate::message::{Message, MessageId};

/// Messages accepted by `send` and not yet delivered.
///
/// Kept in arrival order; priority is resolved at dequeue time, so enqueue is
/// a plain push.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PendingQueue {
    messages: Vec<Message>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, message: Message) {
        debug_assert!(
            message.is_queued(),
            "only queued messages belong in the pending queue"
        );
        self.messages.push(message);
    }

    /// The message `dequeue_highest_priority` would return, if any.
    pub fn peek_highest_priority(&self) -> Option<&Message> {
        self.messages.iter().min_by_key(|m| m.order_key())
    }

    /// Remove the most urgent, oldest message.
    pub fn dequeue_highest_priority(&mut self) -> Result<Message, ChatError> {
        let idx = self
            .messages
            .iter()
            .enumerate()
            .min_by_key(|(_, m)| m.order_key())
            .map(|(idx, _)| idx)
            .ok_or(ChatError::EmptyQueue)?;
        Ok(self.messages.remove(idx))
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.messages.iter().any(|m| m.id == id)
    }

    /// Pending messages in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
