//! In-memory chat model: a priority pending queue, a message store, an undo
//! stack for deletions and an activity log, driven by a single controller.

pub mod activity;
pub mod clock;
pub mod controller;
pub mod error;
pub mod message;
pub mod notification;
pub mod queue;
pub mod roster;
pub mod state;
pub mod store;
pub mod undo;
pub mod view;

pub use controller::Controller;
pub use error::ChatError;
pub use message::{Message, MessageId, MessageText, Priority};
pub use state::{ChatState, Command, Effects, Outcome};
