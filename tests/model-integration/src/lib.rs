//! Shared setup for the model integration suites.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use minichat_common::clock::Clock;
use minichat_common::{Controller, Message, MessageText, Priority};

/// Deterministic clock: each reading advances by `step`.
///
/// Clones share the same cursor, so a test can keep one handle and pin the
/// time the controller will see next.
#[derive(Debug, Clone)]
pub struct StepClock {
    next: Rc<Cell<DateTime<Utc>>>,
    step: Duration,
}

impl StepClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Rc::new(Cell::new(start)),
            step,
        }
    }

    /// The next reading will be `at`.
    pub fn set(&self, at: DateTime<Utc>) {
        self.next.set(at);
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}

/// 2024-01-01T09:00:00Z
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

/// Owned copy of all three containers, for before/after comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Containers {
    pub pending: Vec<Message>,
    pub store: Vec<Message>,
    pub undo: Vec<Message>,
}

pub struct Harness {
    pub controller: Controller<StepClock>,
    pub clock: StepClock,
}

impl Harness {
    /// Fresh controller on a clock ticking one second per command.
    pub fn setup() -> Self {
        init_tracing();
        let clock = StepClock::new(epoch(), Duration::seconds(1));
        Self {
            controller: Controller::with_clock(clock.clone()),
            clock,
        }
    }

    pub fn send(&mut self, text: &str, priority: Priority) -> Message {
        let text = MessageText::new(text).unwrap_or_else(|e| panic!("bad test text {text:?}: {e}"));
        self.controller
            .send(text, priority)
            .unwrap_or_else(|e| panic!("send failed: {e}"))
    }

    pub fn receive_text(&mut self) -> Option<String> {
        self.controller.receive().ok().map(|m| m.text.to_string())
    }

    pub fn containers(&self) -> Containers {
        let state = self.controller.state();
        Containers {
            pending: state.pending().iter().cloned().collect(),
            store: state.store().list().into_iter().cloned().collect(),
            undo: state.undo_stack().iter().cloned().collect(),
        }
    }
}

/// Route `tracing` output through the test writer; repeated calls are harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
