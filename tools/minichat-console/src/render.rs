//! Plain-text panels for the console.

use minichat_common::activity::Severity;
use minichat_common::notification::Notification;
use minichat_common::view::ChatView;
use minichat_common::Message;

fn message_line(message: &Message, selected: bool) -> String {
    let cursor = if selected { '>' } else { ' ' };
    let urgent = if message.priority.is_urgent() {
        " 🔥 Urgent"
    } else {
        ""
    };
    let struck = if message.is_deleted() {
        " (deleted)"
    } else {
        ""
    };
    let id = message.id.to_string();
    let time = message.time_label();
    let text = &message.text;
    let glyph = message.delivery_state().glyph();
    format!("{cursor} {id:<5} {time}  {text}{urgent}  {glyph}{struck}")
}

/// The main chat panel.
pub fn chat(view: &ChatView) -> String {
    let mut out = format!("── Mini Chat App ── {} messages\n", view.message_count);
    if view.messages.is_empty() {
        out.push_str("  No messages yet. Send a message to get started!\n");
    }
    for message in &view.messages {
        let selected = view.selected_message == Some(message.id);
        out.push_str(&message_line(message, selected));
        out.push('\n');
    }
    out.push_str(&format!("  pending: {}\n", view.pending_count));
    out
}

/// Compact deleted-messages summary.
pub fn deleted(view: &ChatView) -> String {
    match &view.undo_preview {
        Some(preview) => format!("── Deleted ({}) ── Last: \"{preview}\"\n", view.undo_count),
        None => format!("── Deleted ({}) ── No deleted messages\n", view.undo_count),
    }
}

/// The tail of the activity log.
pub fn console_log(view: &ChatView) -> String {
    let mut out = String::from("── Console Log ──\n");
    if view.recent_log.is_empty() {
        out.push_str("  No recent activity\n");
    }
    for entry in &view.recent_log {
        let mark = match entry.severity {
            Severity::Success => '+',
            Severity::Warning => '!',
            Severity::Info => ' ',
        };
        out.push_str(&format!("{mark} {}\n", entry.display_line()));
    }
    out
}

pub fn members(view: &ChatView) -> String {
    let mut out = String::from("── Chat Members ──\n");
    for member in &view.members {
        let selected = view.selected_member.as_ref() == Some(&member.id);
        let cursor = if selected { '>' } else { ' ' };
        let badge = member
            .unread_badge()
            .map(|b| format!(" ({b})"))
            .unwrap_or_default();
        let initial = member.initial().unwrap_or('?');
        let name = &member.name;
        let presence = member.presence.label();
        out.push_str(&format!("{cursor} [{initial}] {name} · {presence}{badge}\n"));
    }
    out
}

pub fn notification(n: &Notification) -> String {
    let tag = if n.is_destructive() { "!!" } else { "**" };
    format!("{tag} {}: {}", n.title, n.description)
}

/// Every panel, top to bottom.
pub fn screen(view: &ChatView) -> String {
    [members(view), chat(view), deleted(view), console_log(view)].concat()
}
