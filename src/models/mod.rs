//! Data models module
//!
//! Contains the question bank and the result summary of a finished run.

pub mod question;
pub mod result;

// Re-export commonly used types
pub use question::{Question, QuestionBank};
pub use result::{QuizResult, ResultTier};
