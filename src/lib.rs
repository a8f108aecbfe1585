//! Quizzer - timed multiple-choice quiz
//!
//! A quiz session that presents a fixed sequence of questions one at a time,
//! accepts a single timed answer per question, tracks the score and keeps a
//! persisted best score. Ships with a terminal UI and a plain line mode.

use std::fmt;

// Public re-exports
pub mod app;
pub mod config;
pub mod logging;
pub mod models;
pub mod session;
pub mod simple;

// Common error types
#[derive(Debug)]
pub enum QuizError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Question bank could not be loaded or failed validation
    QuestionBankError(String),
    /// TUI rendering or interaction error
    TuiError(String),
    /// Key-value store read/write error
    PersistenceError(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::IoError(err) => write!(f, "I/O error: {}", err),
            QuizError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            QuizError::QuestionBankError(msg) => write!(f, "Question bank error: {}", msg),
            QuizError::TuiError(msg) => write!(f, "TUI error: {}", msg),
            QuizError::PersistenceError(msg) => write!(f, "Persistence error: {}", msg),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for QuizError {
    fn from(err: std::io::Error) -> Self {
        QuizError::IoError(err)
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for QuizError {
    fn from(err: toml::de::Error) -> Self {
        QuizError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for QuizError {
    fn from(err: toml::ser::Error) -> Self {
        QuizError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for quizzer operations
pub type Result<T> = std::result::Result<T, QuizError>;

/// Error handling utilities
pub mod error {
    use super::QuizError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &QuizError) -> String {
        match error {
            QuizError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            QuizError::QuestionBankError(msg) => {
                format!("Could not use the question file: {}.", msg)
            }
            QuizError::TuiError(_) => {
                "The terminal could not be set up. Try `interface = \"plain\"` in the config."
                    .to_string()
            }
            QuizError::PersistenceError(_) => {
                "Failed to save the high score. Check disk space and permissions.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "quizzer";
pub const CONFIG_FILE: &str = "quizzer.toml";
pub const STORE_FILE: &str = "store.json";
pub const LOG_FILE: &str = "quizzer.log";
/// Store key holding the best final score, as a decimal string
pub const HIGH_SCORE_KEY: &str = "quizHighScore";
/// Seconds allowed per question unless configured otherwise
pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 15;
pub const POINTS_PER_CORRECT: u32 = 10;
/// Length of the countdown arc the remaining-time fraction is mapped onto
pub const TIMER_ARC_LENGTH: f64 = 283.0;
pub const OPTIONS_PER_QUESTION: usize = 4;
