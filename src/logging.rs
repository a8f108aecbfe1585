//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! The terminal belongs to the quiz UI, so log output goes to a file. The
//! `RUST_LOG` environment variable overrides the configured level.
//!
//! # Log Levels
//!
//! - `warn`: persistence failures
//! - `info`: run start/finish, new high scores
//! - `debug`: answers, timeouts, ignored transitions

use crate::config::QuizConfig;
use crate::{QuizError, Result, APP_NAME, LOG_FILE};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter (error, warn, info, debug, trace).
    pub level: Level,
    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
    /// Whether to include target (module path) in log output.
    pub with_target: bool,
    /// Log file path.
    pub log_file: PathBuf,
}

impl LogConfig {
    /// Create a `LogConfig` writing to `log_file` at info level.
    pub fn new(log_file: PathBuf) -> Self {
        Self {
            level: Level::INFO,
            with_timestamps: true,
            with_target: false,
            log_file,
        }
    }

    /// Build from the quiz configuration, falling back to the default log path.
    pub fn from_quiz_config(config: &QuizConfig) -> Result<Self> {
        let log_file = match &config.log_file {
            Some(path) => path.clone(),
            None => default_log_path()?,
        };
        Ok(Self::new(log_file).with_level(parse_level(&config.log_level)))
    }

    /// Set log level directly.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn with_timestamps(mut self, enable: bool) -> Self {
        self.with_timestamps = enable;
        self
    }

    /// Enable or disable target (module path) in output.
    #[must_use]
    pub fn with_target(mut self, enable: bool) -> Self {
        self.with_target = enable;
        self
    }
}

/// Default log location: $DATA_HOME/quizzer/quizzer.log
pub fn default_log_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        QuizError::ConfigError("Unable to determine data directory".to_string())
    })?;
    Ok(data_dir.join(APP_NAME).join(LOG_FILE))
}

/// Parse a level name, defaulting to info.
pub fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Initialize the global tracing subscriber.
///
/// Should be called once at application startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    if let Some(parent) = config.log_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let layer = fmt::layer()
        .with_writer(SharedFileWriter::new(file))
        .with_ansi(false)
        .with_target(config.with_target);
    let registry = tracing_subscriber::registry().with(build_env_filter(config.level));

    let installed = if config.with_timestamps {
        registry.with(layer).try_init()
    } else {
        registry.with(layer.without_time()).try_init()
    };
    installed.map_err(|e| QuizError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl SharedFileWriter {
    fn new(file: std::fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<std::fs::File>>,
}

impl std::io::Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| std::io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| std::io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG`.
fn build_env_filter(level: Level) -> EnvFilter {
    let level_str = level.as_str().to_lowercase();

    // External crates stay at warn
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,quizzer={}", level_str)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("WARN"), Level::WARN);
        assert_eq!(parse_level("nonsense"), Level::INFO);
    }

    #[test]
    fn test_from_quiz_config() {
        let config = QuizConfig::new()
            .with_log_level("trace")
            .with_log_file(Some(PathBuf::from("/tmp/quiz.log")));
        let log_config = LogConfig::from_quiz_config(&config).unwrap();
        assert_eq!(log_config.level, Level::TRACE);
        assert_eq!(log_config.log_file, PathBuf::from("/tmp/quiz.log"));
    }

    #[test]
    fn test_default_log_path() {
        let path = default_log_path().unwrap();
        assert!(path.to_string_lossy().contains("quizzer"));
        assert!(path.to_string_lossy().ends_with("quizzer.log"));
    }

    #[test]
    fn test_builder() {
        let config = LogConfig::new(PathBuf::from("x.log"))
            .with_timestamps(false)
            .with_target(true)
            .with_level(Level::ERROR);
        assert!(!config.with_timestamps);
        assert!(config.with_target);
        assert_eq!(config.level, Level::ERROR);
    }
}
