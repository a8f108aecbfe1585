//! Configuration management module
//!
//! Handles loading, saving, and validation of quiz settings.

use crate::models::QuestionBank;
use crate::{QuizError, Result, APP_NAME, CONFIG_FILE, DEFAULT_SECONDS_PER_QUESTION};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const MAX_SECONDS_PER_QUESTION: u32 = 600;

/// Quiz configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Countdown budget for each question, in seconds
    pub seconds_per_question: u32,
    /// JSON question bank; the built-in questions are used when unset
    pub question_file: Option<PathBuf>,
    /// Shuffle the questions once at startup
    pub shuffle_questions: bool,
    /// Front end to run
    pub interface: Interface,
    /// Log level filter (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log file; defaults to the data directory
    pub log_file: Option<PathBuf>,
}

/// Front end variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interface {
    /// Full-screen terminal UI
    #[default]
    Tui,
    /// Line-oriented prompts on stdin/stdout
    Plain,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            seconds_per_question: DEFAULT_SECONDS_PER_QUESTION,
            question_file: None,
            shuffle_questions: false,
            interface: Interface::Tui,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl QuizConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.seconds_per_question == 0 {
            return Err(QuizError::ConfigError(
                "Seconds per question must be greater than 0".to_string(),
            ));
        }

        if self.seconds_per_question > MAX_SECONDS_PER_QUESTION {
            return Err(QuizError::ConfigError(format!(
                "Seconds per question too large: {} (max: {})",
                self.seconds_per_question, MAX_SECONDS_PER_QUESTION
            )));
        }

        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            other => {
                return Err(QuizError::ConfigError(format!(
                    "Unknown log level: {}",
                    other
                )));
            }
        }

        Ok(())
    }

    /// Set the per-question countdown budget
    pub fn with_seconds_per_question(mut self, seconds: u32) -> Self {
        self.seconds_per_question = seconds;
        self
    }

    /// Set the question bank file
    pub fn with_question_file(mut self, path: Option<PathBuf>) -> Self {
        self.question_file = path;
        self
    }

    /// Set whether questions are shuffled at startup
    pub fn with_shuffle_questions(mut self, shuffle: bool) -> Self {
        self.shuffle_questions = shuffle;
        self
    }

    /// Set the front end
    pub fn with_interface(mut self, interface: Interface) -> Self {
        self.interface = interface;
        self
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }

    /// Set the log file
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Build the question bank this configuration asks for
    pub fn question_bank(&self) -> Result<QuestionBank> {
        let bank = match &self.question_file {
            Some(path) => QuestionBank::load(path)?,
            None => QuestionBank::builtin(),
        };

        if self.shuffle_questions {
            Ok(bank.shuffled())
        } else {
            Ok(bank)
        }
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file
    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if !config_path.exists() {
            // Return default configuration if file doesn't exist
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        // Validate the loaded configuration
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        // Validate before saving
        self.validate()?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuizError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/quizzer/quizzer.toml or falls back to $HOME/.config/quizzer/quizzer.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            QuizError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.seconds_per_question, 15);
        assert!(!config.shuffle_questions);
        assert_eq!(config.interface, Interface::Tui);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(QuizConfig::new()
            .with_seconds_per_question(0)
            .validate()
            .is_err());
        assert!(QuizConfig::new()
            .with_seconds_per_question(601)
            .validate()
            .is_err());
        assert!(QuizConfig::new().with_log_level("loud").validate().is_err());
        assert!(QuizConfig::new().with_log_level("DEBUG").validate().is_ok());
    }

    #[test]
    fn test_toml_serialization() {
        let config = QuizConfig::new()
            .with_seconds_per_question(20)
            .with_interface(Interface::Plain)
            .with_question_file(Some(PathBuf::from("/tmp/questions.json")));
        let toml_str = toml::to_string(&config).expect("Failed to serialize to TOML");
        assert!(toml_str.contains("interface = \"plain\""));

        let deserialized: QuizConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize from TOML");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: QuizConfig = toml::from_str("seconds_per_question = 30\n").unwrap();
        assert_eq!(config.seconds_per_question, 30);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.interface, Interface::Tui);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quizzer").join("quizzer.toml");

        let config = QuizConfig::new().with_seconds_per_question(10);
        config.save_to(&path).unwrap();
        assert_eq!(QuizConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = QuizConfig::load_from(&temp_dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, QuizConfig::default());
    }

    #[test]
    fn test_load_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quizzer.toml");
        fs::write(&path, "seconds_per_question = 0\n").unwrap();
        assert!(matches!(
            QuizConfig::load_from(&path),
            Err(QuizError::ConfigError(_))
        ));
    }

    #[test]
    fn test_question_bank_selection() {
        let bank = QuizConfig::default().question_bank().unwrap();
        assert_eq!(bank, QuestionBank::builtin());

        let missing = QuizConfig::new()
            .with_question_file(Some(PathBuf::from("/definitely/not/here.json")));
        assert!(missing.question_bank().is_err());
    }

    #[test]
    fn test_config_file_path() {
        let path = QuizConfig::config_file_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("quizzer"));
        assert!(path.to_string_lossy().contains("quizzer.toml"));
    }
}
