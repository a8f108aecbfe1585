//! Quiz session module
//!
//! Contains the session state machine, the per-question countdown and the
//! render/persistence seams the session is driven through.

pub mod countdown;
pub mod quiz;
pub mod store;
pub mod view;

pub use countdown::Countdown;
pub use quiz::{AnswerSlot, QuizPhase, QuizSession};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use view::{NextLabel, OptionDecoration, View};
