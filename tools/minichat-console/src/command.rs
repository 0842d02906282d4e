use std::str::FromStr;

use minichat_common::roster::MemberId;
use minichat_common::{ChatError, MessageId, MessageText, Priority};
use thiserror::Error;

/// One line typed at the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Send {
        text: MessageText,
        priority: Priority,
    },
    Receive,
    Delete(MessageId),
    Select(MessageId),
    DeleteSelected,
    Undo,
    Member(MemberId),
    Show,
    Snapshot,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a message id")]
    BadId(String),
    #[error(transparent)]
    Text(#[from] ChatError),
}

pub const HELP: &str = "\
commands:
  send <text>        queue a normal message
  urgent <text>      queue an urgent message
  receive            deliver the highest-priority pending message
  select <id>        select a delivered message
  delete <id>        delete a delivered message (undoable)
  delete-selected    delete the selected message
  undo               restore the most recently deleted message
  member <id>        switch the selected chat member
  show               redraw the chat
  snapshot           print the current view as JSON
  help               this text
  quit               leave";

impl FromStr for ConsoleCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "send" => Ok(ConsoleCommand::Send {
                text: message_text("send", rest)?,
                priority: Priority::Normal,
            }),
            "urgent" => Ok(ConsoleCommand::Send {
                text: message_text("urgent", rest)?,
                priority: Priority::Urgent,
            }),
            "receive" | "recv" => Ok(ConsoleCommand::Receive),
            "delete" | "del" => Ok(ConsoleCommand::Delete(message_id("delete", rest)?)),
            "select" => Ok(ConsoleCommand::Select(message_id("select", rest)?)),
            "delete-selected" => Ok(ConsoleCommand::DeleteSelected),
            "undo" => Ok(ConsoleCommand::Undo),
            "member" => {
                if rest.is_empty() {
                    return Err(ParseError::MissingArgument("member"));
                }
                Ok(ConsoleCommand::Member(MemberId(rest.to_string())))
            }
            "show" | "list" => Ok(ConsoleCommand::Show),
            "snapshot" => Ok(ConsoleCommand::Snapshot),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn message_text(command: &'static str, rest: &str) -> Result<MessageText, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingArgument(command));
    }
    Ok(MessageText::new(rest)?)
}

fn message_id(command: &'static str, rest: &str) -> Result<MessageId, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingArgument(command));
    }
    rest.trim_start_matches('#')
        .parse()
        .map(MessageId)
        .map_err(|_| ParseError::BadId(rest.to_string()))
}
