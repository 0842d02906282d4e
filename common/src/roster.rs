use serde::{Deserialize, Serialize};

use crate::error::ChatError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Online,
    Offline,
}

impl Presence {
    pub fn label(self) -> &'static str {
        match self {
            Presence::Online => "Online",
            Presence::Offline => "Offline",
        }
    }
}

/// Someone shown in the members panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub presence: Presence,
    pub unread_count: u32,
}

impl Member {
    pub fn online(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: MemberId(id.into()),
            name: name.into(),
            presence: Presence::Online,
            unread_count: 0,
        }
    }

    /// Uppercased first character of the name, for the avatar.
    pub fn initial(&self) -> Option<char> {
        let first = self.name.chars().next()?;
        first.to_uppercase().next()
    }

    /// Badge text, capped at "99+". `None` when there is nothing unread.
    pub fn unread_badge(&self) -> Option<String> {
        match self.unread_count {
            0 => None,
            n if n > 99 => Some("99+".to_string()),
            n => Some(n.to_string()),
        }
    }
}

/// Chat members plus the one currently selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<Member>,
    selected: Option<MemberId>,
}

impl Roster {
    /// The first member starts selected.
    pub fn new(members: Vec<Member>) -> Self {
        let selected = members.first().map(|m| m.id.clone());
        Self { members, selected }
    }

    /// Online members named in order, with ids "1", "2", ...
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Member::online((i + 1).to_string(), name))
            .collect();
        Self::new(members)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn get(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn selected(&self) -> Option<&Member> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Select a member and clear their unread count.
    pub fn select(&mut self, id: &MemberId) -> Result<&Member, ChatError> {
        let member = self
            .members
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| ChatError::UnknownMember(id.0.clone()))?;
        member.unread_count = 0;
        self.selected = Some(id.clone());
        Ok(member)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::from_names(DEFAULT_MEMBERS)
    }
}

/// Members shown when nothing else is configured.
pub const DEFAULT_MEMBERS: [&str; 3] = ["Akash", "Vishaal", "Ulaganathan"];
