use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// Unique message identifier (monotonically increasing within a session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Message body. Never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageText(String);

impl MessageText {
    /// Trims surrounding whitespace and rejects blank input.
    pub fn new(text: impl Into<String>) -> Result<Self, ChatError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyText);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `max_chars` characters, with `...` appended when truncated.
    pub fn preview(&self, max_chars: usize) -> String {
        match self.0.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &self.0[..cut]),
            None => self.0.clone(),
        }
    }
}

impl TryFrom<String> for MessageText {
    type Error = ChatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MessageText> for String {
    fn from(value: MessageText) -> Self {
        value.0
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Delivery priority.
///
/// Variant order matters: the derived `Ord` puts `Urgent` before `Normal`,
/// so the smallest ordering key is always the next message to deliver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    #[default]
    Normal,
}

impl Priority {
    pub fn is_urgent(self) -> bool {
        matches!(self, Priority::Urgent)
    }

    /// Capitalized label for log and notification text.
    pub fn label(self) -> &'static str {
        match self {
            Priority::Urgent => "Urgent",
            Priority::Normal => "Normal",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Urgent => f.write_str("urgent"),
            Priority::Normal => f.write_str("normal"),
        }
    }
}

/// Where a message is in its life. Each state carries only the data it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Lifecycle {
    /// Waiting in the pending queue.
    Queued,
    /// Visible in the chat.
    Delivered { delivered_at: DateTime<Utc> },
    /// Hidden and held on the undo stack.
    Deleted {
        delivered_at: DateTime<Utc>,
        deleted_at: DateTime<Utc>,
    },
}

/// Display marker for a message's most recent transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryState {
    Sent,
    Received,
    Deleted,
}

impl DeliveryState {
    /// Status tick shown next to the message time.
    pub fn glyph(self) -> &'static str {
        match self {
            DeliveryState::Sent => "✔",
            DeliveryState::Received => "✔✔",
            DeliveryState::Deleted => "🗑",
        }
    }
}

/// A chat message. Only `lifecycle` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: MessageText,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
}

impl Message {
    pub fn new(
        id: MessageId,
        text: MessageText,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text,
            priority,
            created_at,
            lifecycle: Lifecycle::Queued,
        }
    }

    /// Key for priority order: urgent first, then oldest, then lowest id.
    pub fn order_key(&self) -> (Priority, DateTime<Utc>, MessageId) {
        (self.priority, self.created_at, self.id)
    }

    pub fn is_queued(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Queued)
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Delivered { .. })
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Deleted { .. })
    }

    pub fn delivery_state(&self) -> DeliveryState {
        match self.lifecycle {
            Lifecycle::Queued => DeliveryState::Sent,
            Lifecycle::Delivered { .. } => DeliveryState::Received,
            Lifecycle::Deleted { .. } => DeliveryState::Deleted,
        }
    }

    /// Queued -> Delivered. Returns false (and changes nothing) from any other state.
    pub(crate) fn deliver(&mut self, at: DateTime<Utc>) -> bool {
        match self.lifecycle {
            Lifecycle::Queued => {
                self.lifecycle = Lifecycle::Delivered { delivered_at: at };
                true
            }
            _ => false,
        }
    }

    /// Delivered -> Deleted.
    pub(crate) fn delete(&mut self, at: DateTime<Utc>) -> bool {
        match self.lifecycle {
            Lifecycle::Delivered { delivered_at } => {
                self.lifecycle = Lifecycle::Deleted {
                    delivered_at,
                    deleted_at: at,
                };
                true
            }
            _ => false,
        }
    }

    /// Deleted -> Delivered, keeping the original delivery time.
    pub(crate) fn restore(&mut self) -> bool {
        match self.lifecycle {
            Lifecycle::Deleted { delivered_at, .. } => {
                self.lifecycle = Lifecycle::Delivered { delivered_at };
                true
            }
            _ => false,
        }
    }

    /// Creation time as `HH:MM` (24-hour).
    pub fn time_label(&self) -> String {
        self.created_at.format("%H:%M").to_string()
    }
}
