use serde::{Deserialize, Serialize};

use crate::activity::LogEntry;
use crate::message::{Message, MessageId};
use crate::roster::{Member, MemberId, Roster};
use crate::state::ChatState;

/// How much of the state a snapshot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Activity log entries kept in the snapshot.
    pub log_tail: usize,
    /// Characters of the top undo entry shown before truncating.
    pub preview_chars: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            log_tail: 3,
            preview_chars: 30,
        }
    }
}

/// Everything the view layer needs to draw after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatView {
    /// Delivered messages (deleted ones included) in presentation order.
    pub messages: Vec<Message>,
    pub message_count: usize,
    pub pending_count: usize,
    pub undo_count: usize,
    /// Truncated text of the message `undo` would restore next.
    pub undo_preview: Option<String>,
    /// Deleted messages, most recent first.
    pub deleted: Vec<Message>,
    pub recent_log: Vec<LogEntry>,
    pub selected_message: Option<MessageId>,
    pub members: Vec<Member>,
    pub selected_member: Option<MemberId>,
}

impl ChatView {
    pub fn build(
        state: &ChatState,
        roster: &Roster,
        selected_message: Option<MessageId>,
        config: &ViewConfig,
    ) -> Self {
        let undo = state.undo_stack();
        Self {
            messages: state.store().list().into_iter().cloned().collect(),
            message_count: state.store().len(),
            pending_count: state.pending().len(),
            undo_count: undo.len(),
            undo_preview: undo.peek().map(|m| m.text.preview(config.preview_chars)),
            deleted: undo.iter().cloned().collect(),
            recent_log: state.activity().recent(config.log_tail).to_vec(),
            selected_message,
            members: roster.members().to_vec(),
            selected_member: roster.selected().map(|m| m.id.clone()),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.undo_count > 0
    }
}
