use minichat_common::activity::Severity;
use minichat_common::message::DeliveryState;
use minichat_common::notification::NotificationVariant;
use minichat_common::view::ViewConfig;
use minichat_common::{ChatError, Command, Outcome, Priority};
use minichat_model_integration::Harness;

/// Hello (normal) then Fire! (urgent): Fire! arrives first, can be deleted
/// and brought back.
#[test]
fn hello_fire_walkthrough() {
    let mut h = Harness::setup();
    h.send("Hello", Priority::Normal);
    let fire = h.send("Fire!", Priority::Urgent);

    let first = h.controller.receive().unwrap();
    assert_eq!(first.text.as_str(), "Fire!");
    assert_eq!(first.delivery_state(), DeliveryState::Received);

    assert_eq!(h.receive_text().as_deref(), Some("Hello"));
    assert_eq!(h.controller.receive(), Err(ChatError::EmptyQueue));

    let effects = h.controller.dispatch(Command::Delete { id: fire.id });
    assert!(matches!(effects.outcome, Ok(Outcome::Deleted(_))));
    assert_eq!(
        h.controller.state().undo_stack().peek().map(|m| m.id),
        Some(fire.id)
    );

    let restored = h.controller.undo().unwrap();
    assert_eq!(restored.id, fire.id);
    assert!(restored.is_delivered());
    assert_eq!(h.controller.state().store().visible_count(), 2);
}

#[test]
fn activity_log_records_every_command() {
    let mut h = Harness::setup();
    h.send("Hello", Priority::Normal);
    let fire = h.send("Fire!", Priority::Urgent);
    h.controller.receive().unwrap();
    h.controller.receive().unwrap();
    let _ = h.controller.receive();
    h.controller.delete(fire.id).unwrap();
    h.controller.undo().unwrap();
    let _ = h.controller.undo();

    let entries = h.controller.state().activity().entries();
    let texts: Vec<_> = entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(
        texts,
        [
            "✅ Normal message queued: \"Hello\"",
            "✅ Urgent message queued: \"Fire!\"",
            "✅ Urgent message received first: \"Fire!\"",
            "✅ Message received: \"Hello\"",
            "❌ No messages to receive",
            "🗑 Message deleted and stored for undo: \"Fire!\"",
            "🔄 Undo performed → message restored: \"Fire!\"",
            "❌ No messages to restore",
        ]
    );

    let severities: Vec<_> = entries.iter().map(|e| e.severity).collect();
    assert_eq!(
        severities,
        [
            Severity::Success,
            Severity::Success,
            Severity::Success,
            Severity::Success,
            Severity::Warning,
            Severity::Warning,
            Severity::Success,
            Severity::Warning,
        ]
    );
}

#[test]
fn notifications_follow_outcomes() {
    let mut h = Harness::setup();
    let undo = h.controller.dispatch(Command::Undo);
    assert_eq!(undo.notification.variant, NotificationVariant::Destructive);
    assert_eq!(undo.notification.description, "Undo stack is empty");

    let text = minichat_common::MessageText::new("Fire!").unwrap();
    let sent = h.controller.dispatch(Command::Send {
        text,
        priority: Priority::Urgent,
    });
    assert_eq!(sent.notification.title, "Message Sent");
    assert_eq!(
        sent.notification.description,
        "Urgent message added to queue"
    );
    assert_eq!(sent.notification.variant, NotificationVariant::Default);
}

#[test]
fn selection_drives_delete() {
    let mut h = Harness::setup();
    let m = h.send("pick", Priority::Normal);
    h.controller.receive().unwrap();
    h.controller.select_message(m.id).unwrap();

    let effects = h.controller.delete_selected().unwrap();
    assert_eq!(effects.notification.title, "Message Deleted");
    assert_eq!(h.controller.selected_message(), None);
    assert!(h.controller.delete_selected().is_none());
}

#[test]
fn view_snapshot_for_the_renderer() {
    let mut h = Harness::setup();
    let long = "a normal message that goes on and on and on";
    h.send(long, Priority::Normal);
    h.send("urgent", Priority::Urgent);
    h.send("still queued", Priority::Normal);
    h.controller.receive().unwrap();
    let normal = h.controller.receive().unwrap();
    h.controller.delete(normal.id).unwrap();

    let view = h.controller.view(&ViewConfig::default());
    assert_eq!(view.message_count, 2);
    assert_eq!(view.pending_count, 1);
    assert_eq!(view.undo_count, 1);
    assert_eq!(
        view.undo_preview.as_deref(),
        Some("a normal message that goes on ...")
    );
    assert_eq!(view.recent_log.len(), 3);
    assert_eq!(view.messages[0].text.as_str(), "urgent");
    assert!(view.messages[1].is_deleted());

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["messages"][1]["lifecycle"]["state"], "deleted");
    assert_eq!(json["selected_member"], "1");
}
