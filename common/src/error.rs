use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::message::MessageId;

/// Recoverable failures of chat operations. None of them leave state half-updated.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ChatError {
    #[error("pending queue is empty")]
    EmptyQueue,
    #[error("undo stack is empty")]
    EmptyStack,
    #[error("message {0} not found in the expected state")]
    NotFound(MessageId),
    #[error("message text must not be empty")]
    EmptyText,
    #[error("unknown chat member: {0}")]
    UnknownMember(String),
}
