use tracing::{debug, info, warn};

use crate::clock::Clock;
#[cfg(feature = "std")]
use crate::clock::SystemClock;
use crate::error::ChatError;
use crate::message::{Message, MessageId, MessageText, Priority};
use crate::roster::{Member, MemberId, Roster};
use crate::state::{ChatState, Command, Effects};
use crate::view::{ChatView, ViewConfig};

/// Owns the chat state for one session and runs view commands against it.
///
/// Besides the four model commands it tracks the UI selection (one message,
/// one roster member). Selection never influences the model.
#[derive(Debug, Clone)]
pub struct Controller<C> {
    state: ChatState,
    roster: Roster,
    selected_message: Option<MessageId>,
    clock: C,
}

#[cfg(feature = "std")]
impl Controller<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

#[cfg(feature = "std")]
impl Default for Controller<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Controller<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: ChatState::new(),
            roster: Roster::default(),
            selected_message: None,
            clock,
        }
    }

    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Apply one command and report what happened.
    pub fn dispatch(&mut self, command: Command) -> Effects {
        debug!(?command, "dispatching chat command");
        let effects = self.state.apply(command, self.clock.now());

        match &effects.outcome {
            Ok(outcome) => {
                let message = outcome.message();
                if message.is_deleted() && self.selected_message == Some(message.id) {
                    self.selected_message = None;
                }
                info!(
                    id = %message.id,
                    priority = %message.priority,
                    state = ?message.delivery_state(),
                    "{}",
                    effects.notification.title
                );
            }
            Err(err) => warn!(%err, "chat command failed"),
        }
        effects
    }

    pub fn send(&mut self, text: MessageText, priority: Priority) -> Result<Message, ChatError> {
        self.dispatch(Command::Send { text, priority })
            .outcome
            .map(|o| o.into_message())
    }

    pub fn receive(&mut self) -> Result<Message, ChatError> {
        self.dispatch(Command::Receive)
            .outcome
            .map(|o| o.into_message())
    }

    pub fn delete(&mut self, id: MessageId) -> Result<Message, ChatError> {
        self.dispatch(Command::Delete { id })
            .outcome
            .map(|o| o.into_message())
    }

    pub fn undo(&mut self) -> Result<Message, ChatError> {
        self.dispatch(Command::Undo)
            .outcome
            .map(|o| o.into_message())
    }

    /// Select a visible (delivered, not deleted) message.
    pub fn select_message(&mut self, id: MessageId) -> Result<&Message, ChatError> {
        match self.state.store().get(id) {
            Some(message) if message.is_delivered() => {
                self.selected_message = Some(id);
                Ok(message)
            }
            _ => Err(ChatError::NotFound(id)),
        }
    }

    pub fn selected_message(&self) -> Option<MessageId> {
        self.selected_message
    }

    /// Delete the selected message and clear the selection.
    /// Returns `None` when nothing is selected.
    pub fn delete_selected(&mut self) -> Option<Effects> {
        let id = self.selected_message.take()?;
        Some(self.dispatch(Command::Delete { id }))
    }

    pub fn select_member(&mut self, id: &MemberId) -> Result<&Member, ChatError> {
        self.roster.select(id)
    }

    /// Post-command snapshot for rendering.
    pub fn view(&self, config: &ViewConfig) -> ChatView {
        ChatView::build(&self.state, &self.roster, self.selected_message, config)
    }
}
