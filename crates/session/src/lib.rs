//! Session orchestration for the Doctype client.
//!
//! Owns the workflow state machine, the conversation transcript, and the
//! backend liveness signal. The presentation layer consumes read-only
//! snapshots and never mutates state directly.

pub mod controller;
pub mod conversation;
pub mod health;
pub mod status;

pub use controller::{SessionController, UploadError};
pub use conversation::{ANSWER_UNAVAILABLE, ConversationManager, SubmitError};
pub use health::HealthMonitor;
pub use status::StatusSignal;
