//! TUI screen components
//!
//! Contains individual screen implementations for different application states.

pub mod quiz;
pub mod results;
pub mod start;

pub use quiz::QuizScreen;
pub use results::{ResultAction, ResultsScreen};
pub use start::StartScreen;
