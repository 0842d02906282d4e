//! The chat model as a single aggregate and its transition function.
//!
//! `ChatState::apply` is the only way the containers change. Each command runs
//! to completion, appends one activity log entry and yields the notification
//! the view should show. A failed command leaves the pending queue, message
//! store and undo stack exactly as they were.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::{ActivityLog, Severity};
use crate::error::ChatError;
use crate::message::{Message, MessageId, MessageText, Priority};
use crate::notification::Notification;
use crate::queue::PendingQueue;
use crate::store::MessageStore;
use crate::undo::UndoStack;

/// A request from the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Send {
        text: MessageText,
        priority: Priority,
    },
    Receive,
    Delete { id: MessageId },
    Undo,
}

/// What a successful command did, with the message as it now stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum Outcome {
    Queued(Message),
    Received(Message),
    Deleted(Message),
    Restored(Message),
}

impl Outcome {
    pub fn message(&self) -> &Message {
        match self {
            Outcome::Queued(m)
            | Outcome::Received(m)
            | Outcome::Deleted(m)
            | Outcome::Restored(m) => m,
        }
    }

    pub fn into_message(self) -> Message {
        match self {
            Outcome::Queued(m)
            | Outcome::Received(m)
            | Outcome::Deleted(m)
            | Outcome::Restored(m) => m,
        }
    }

    fn notification(&self) -> Notification {
        match self {
            Outcome::Queued(m) => Notification::info(
                "Message Sent",
                format!("{} message added to queue", m.priority.label()),
            ),
            Outcome::Received(m) => {
                Notification::info("Message Received", format!("Received: \"{}\"", m.text))
            }
            Outcome::Deleted(_) => {
                Notification::info("Message Deleted", "Message moved to undo stack")
            }
            Outcome::Restored(m) => {
                Notification::info("Message Restored", format!("Restored: \"{}\"", m.text))
            }
        }
    }
}

/// Everything a command produces besides the state change itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effects {
    pub outcome: Result<Outcome, ChatError>,
    pub notification: Notification,
}

/// Pending queue, message store, undo stack and activity log, owned together.
///
/// Serializable for inspection only; states come from `apply`, not decoding.
///
/// ```compile_fail
/// fn decodable<T: serde::de::DeserializeOwned>() {}
/// decodable::<minichat_common::ChatState>();
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ChatState {
    pending: PendingQueue,
    store: MessageStore,
    undo: UndoStack,
    log: ActivityLog,
    next_id: u64,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            pending: PendingQueue::new(),
            store: MessageStore::new(),
            undo: UndoStack::new(),
            log: ActivityLog::new(),
            next_id: 1,
        }
    }
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &PendingQueue {
        &self.pending
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.log
    }

    /// Run one command at time `now`.
    pub fn apply(&mut self, command: Command, now: DateTime<Utc>) -> Effects {
        let outcome = match command {
            Command::Send { text, priority } => Ok(self.send(text, priority, now)),
            Command::Receive => self.receive(now),
            Command::Delete { id } => self.delete(id, now),
            Command::Undo => self.undo(now),
        };
        let notification = match &outcome {
            Ok(outcome) => outcome.notification(),
            Err(err) => Notification::for_error(err),
        };
        Effects {
            outcome,
            notification,
        }
    }

    fn allocate_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }

    fn send(&mut self, text: MessageText, priority: Priority, now: DateTime<Utc>) -> Outcome {
        let message = Message::new(self.allocate_id(), text, priority, now);
        let label = priority.label();
        self.log.append(
            now,
            format!("✅ {label} message queued: \"{}\"", message.text),
            Severity::Success,
        );
        self.pending.enqueue(message.clone());
        Outcome::Queued(message)
    }

    fn receive(&mut self, now: DateTime<Utc>) -> Result<Outcome, ChatError> {
        let message = match self.pending.dequeue_highest_priority() {
            Ok(message) => message,
            Err(err) => {
                self.log
                    .append(now, "❌ No messages to receive", Severity::Warning);
                return Err(err);
            }
        };

        let delivered = self.store.add_delivered(message, now).clone();
        let text = if delivered.priority.is_urgent() {
            format!("✅ Urgent message received first: \"{}\"", delivered.text)
        } else {
            format!("✅ Message received: \"{}\"", delivered.text)
        };
        self.log.append(now, text, Severity::Success);
        Ok(Outcome::Received(delivered))
    }

    fn delete(&mut self, id: MessageId, now: DateTime<Utc>) -> Result<Outcome, ChatError> {
        let deleted = match self.store.mark_deleted(id, now) {
            Ok(message) => message.clone(),
            Err(err) => {
                self.log.append(
                    now,
                    format!("❌ No delivered message {id} to delete"),
                    Severity::Warning,
                );
                return Err(err);
            }
        };

        self.undo.push(deleted.clone());
        self.log.append(
            now,
            format!(
                "🗑 Message deleted and stored for undo: \"{}\"",
                deleted.text
            ),
            Severity::Warning,
        );
        Ok(Outcome::Deleted(deleted))
    }

    fn undo(&mut self, now: DateTime<Utc>) -> Result<Outcome, ChatError> {
        let top = match self.undo.pop() {
            Ok(top) => top,
            Err(err) => {
                self.log
                    .append(now, "❌ No messages to restore", Severity::Warning);
                return Err(err);
            }
        };

        let id = top.id;
        let restored = match self.store.mark_restored(id) {
            Ok(message) => message.clone(),
            Err(err) => {
                // Store disagrees with the stack; keep both as they were.
                self.undo.push(top);
                self.log.append(
                    now,
                    format!("❌ Deleted message {id} is missing from the chat"),
                    Severity::Warning,
                );
                return Err(err);
            }
        };

        self.log.append(
            now,
            format!(
                "🔄 Undo performed → message restored: \"{}\"",
                restored.text
            ),
            Severity::Success,
        );
        Ok(Outcome::Restored(restored))
    }
}
