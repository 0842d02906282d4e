use serde::{Deserialize, Serialize};

use crate::error::ChatError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

/// A toast for the view layer to show after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    /// Toast for a failed command.
    pub fn for_error(err: &ChatError) -> Self {
        match err {
            ChatError::EmptyQueue => Self::destructive("No Messages", "Queue is empty"),
            ChatError::EmptyStack => Self::destructive("No Undo Available", "Undo stack is empty"),
            ChatError::NotFound(id) => {
                Self::destructive("Message Not Found", format!("No delivered message {id}"))
            }
            ChatError::EmptyText => Self::destructive("Empty Message", "Type a message first"),
            ChatError::UnknownMember(name) => {
                Self::destructive("Unknown Member", format!("No member named {name}"))
            }
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}
