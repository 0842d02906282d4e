use chrono::Duration;

use minichat_common::message::Lifecycle;
use minichat_common::{ChatError, Priority};
use minichat_model_integration::{epoch, Harness};

const SENDS: usize = 6;

/// Every urgent/normal pattern of `SENDS` messages.
fn all_patterns() -> impl Iterator<Item = Vec<Priority>> {
    (0u32..1 << SENDS).map(|bits| {
        (0..SENDS)
            .map(|i| {
                if bits & (1 << i) != 0 {
                    Priority::Urgent
                } else {
                    Priority::Normal
                }
            })
            .collect()
    })
}

#[test]
fn urgent_always_received_before_normal() {
    for pattern in all_patterns() {
        let mut h = Harness::setup();
        for (i, priority) in pattern.iter().enumerate() {
            h.send(&format!("m{i}"), *priority);
        }

        let mut seen_normal = false;
        while let Ok(message) = h.controller.receive() {
            match message.priority {
                Priority::Normal => seen_normal = true,
                Priority::Urgent => assert!(
                    !seen_normal,
                    "urgent {} delivered after a normal message for {pattern:?}",
                    message.text
                ),
            }
        }
        assert!(h.controller.state().pending().is_empty());
    }
}

#[test]
fn fifo_within_priority_class() {
    for pattern in all_patterns() {
        let mut h = Harness::setup();
        for (i, priority) in pattern.iter().enumerate() {
            h.send(&format!("m{i}"), *priority);
        }

        let mut last_urgent = None;
        let mut last_normal = None;
        while let Ok(message) = h.controller.receive() {
            let last = match message.priority {
                Priority::Urgent => &mut last_urgent,
                Priority::Normal => &mut last_normal,
            };
            if let Some(prev) = *last {
                assert!(prev < message.created_at, "out of order for {pattern:?}");
            }
            *last = Some(message.created_at);
        }
    }
}

#[test]
fn created_at_not_arrival_order_decides() {
    let mut h = Harness::setup();
    // Pin timestamps so the later arrival is the older message.
    h.clock.set(epoch() + Duration::minutes(10));
    h.send("newer", Priority::Normal);
    h.clock.set(epoch());
    h.send("older", Priority::Normal);

    assert_eq!(h.receive_text().as_deref(), Some("older"));
    assert_eq!(h.receive_text().as_deref(), Some("newer"));
}

#[test]
fn identical_timestamps_deliver_in_send_order() {
    let mut h = Harness::setup();
    for text in ["first", "second", "third"] {
        h.clock.set(epoch());
        h.send(text, Priority::Urgent);
    }
    let received: Vec<_> = std::iter::from_fn(|| h.receive_text()).collect();
    assert_eq!(received, ["first", "second", "third"]);
}

#[test]
fn delete_then_undo_restores_exact_state() {
    let mut h = Harness::setup();
    h.send("one", Priority::Normal);
    let target = h.send("two", Priority::Urgent);
    h.send("three", Priority::Normal);
    for _ in 0..3 {
        h.controller.receive().unwrap();
    }
    let before = h.containers();

    h.controller.delete(target.id).unwrap();
    let restored = h.controller.undo().unwrap();

    assert_eq!(restored.id, target.id);
    assert_eq!(restored.text, target.text);
    assert_eq!(restored.priority, target.priority);
    assert!(matches!(restored.lifecycle, Lifecycle::Delivered { .. }));
    assert_eq!(h.containers(), before);
}

#[test]
fn undo_stack_is_lifo() {
    let mut h = Harness::setup();
    let a = h.send("A", Priority::Normal);
    let b = h.send("B", Priority::Normal);
    h.controller.receive().unwrap();
    h.controller.receive().unwrap();

    h.controller.delete(a.id).unwrap();
    h.controller.delete(b.id).unwrap();

    assert_eq!(h.controller.undo().unwrap().id, b.id);
    assert_eq!(h.controller.undo().unwrap().id, a.id);
    assert_eq!(h.controller.undo(), Err(ChatError::EmptyStack));
}

#[test]
fn redelete_after_undo_is_a_fresh_top_entry() {
    let mut h = Harness::setup();
    let a = h.send("A", Priority::Normal);
    let b = h.send("B", Priority::Normal);
    h.controller.receive().unwrap();
    h.controller.receive().unwrap();

    h.controller.delete(a.id).unwrap();
    h.controller.delete(b.id).unwrap();
    h.controller.undo().unwrap();
    h.controller.undo().unwrap();
    h.controller.delete(b.id).unwrap();
    h.controller.delete(a.id).unwrap();

    let stack: Vec<_> = h
        .controller
        .state()
        .undo_stack()
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(stack, [a.id, b.id]);
}

#[test]
fn empty_receive_leaves_containers_unchanged() {
    let mut h = Harness::setup();
    let m = h.send("x", Priority::Normal);
    h.controller.receive().unwrap();
    h.controller.delete(m.id).unwrap();
    let before = h.containers();
    let log_len = h.controller.state().activity().len();

    assert_eq!(h.controller.receive(), Err(ChatError::EmptyQueue));
    assert_eq!(h.containers(), before);
    assert_eq!(h.controller.state().activity().len(), log_len + 1);
}

#[test]
fn empty_undo_leaves_containers_unchanged() {
    let mut h = Harness::setup();
    h.send("queued", Priority::Urgent);
    h.send("delivered", Priority::Normal);
    h.controller.receive().unwrap();
    let before = h.containers();

    assert_eq!(h.controller.undo(), Err(ChatError::EmptyStack));
    assert_eq!(h.containers(), before);
}

#[test]
fn deleted_messages_never_pending_and_stacked_once() {
    let mut h = Harness::setup();
    let ids: Vec<_> = (0..4)
        .map(|i| h.send(&format!("m{i}"), Priority::Normal).id)
        .collect();
    for _ in 0..3 {
        h.controller.receive().unwrap();
    }

    // The fourth message is still queued and cannot be deleted.
    assert_eq!(
        h.controller.delete(ids[3]),
        Err(ChatError::NotFound(ids[3]))
    );
    h.controller.delete(ids[0]).unwrap();
    h.controller.delete(ids[1]).unwrap();
    assert!(h.controller.delete(ids[1]).is_err());

    let state = h.controller.state();
    for message in state.store().list().into_iter().filter(|m| m.is_deleted()) {
        assert!(!state.pending().contains(message.id));
        let copies = state
            .undo_stack()
            .iter()
            .filter(|m| m.id == message.id)
            .count();
        assert_eq!(copies, 1);
    }
    assert_eq!(state.undo_stack().len(), 2);
}
