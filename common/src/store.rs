use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ChatError;
use crate::message::{Message, MessageId};

/// Every message that has ever been delivered, deleted ones included.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageStore {
    messages: BTreeMap<MessageId, Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a message fresh off the pending queue, marking it delivered.
    ///
    /// A message that is not queued keeps its current lifecycle.
    pub fn add_delivered(&mut self, mut message: Message, at: DateTime<Utc>) -> &Message {
        message.deliver(at);
        let id = message.id;
        self.messages.insert(id, message);
        &self.messages[&id]
    }

    /// Delivered -> Deleted. Returns the updated message.
    pub fn mark_deleted(
        &mut self,
        id: MessageId,
        at: DateTime<Utc>,
    ) -> Result<&Message, ChatError> {
        let message = self.messages.get_mut(&id).ok_or(ChatError::NotFound(id))?;
        if message.delete(at) {
            Ok(message)
        } else {
            Err(ChatError::NotFound(id))
        }
    }

    /// Deleted -> Delivered. Returns the updated message.
    pub fn mark_restored(&mut self, id: MessageId) -> Result<&Message, ChatError> {
        let message = self.messages.get_mut(&id).ok_or(ChatError::NotFound(id))?;
        if message.restore() {
            Ok(message)
        } else {
            Err(ChatError::NotFound(id))
        }
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.get(&id)
    }

    /// All messages in presentation order: urgent first, then oldest first.
    pub fn list(&self) -> Vec<&Message> {
        let mut list: Vec<_> = self.messages.values().collect();
        list.sort_by_key(|m| m.order_key());
        list
    }

    /// Messages currently shown as live (delivered and not deleted).
    pub fn visible_count(&self) -> usize {
        self.messages.values().filter(|m| m.is_delivered()).count()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
