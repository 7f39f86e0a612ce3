//! Structured logging for the survey dashboard.
//!
//! Provides context-rich logging with per-endpoint source tags,
//! timestamps, and severity levels. Supports both console output and
//! file-based logging. Fetch failures are logged through the
//! classification helpers so operators can tell backend degradation
//! (transport errors) from bad data (parse errors) at a glance.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use crate::model::FetchError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl LogLevel {
    /// Parses a config/env level name. Unknown names fall back to `Info`.
    pub fn from_name(name: &str) -> LogLevel {
        match name.to_ascii_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "warn" | "warning" => LogLevel::Warning,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

// ---------------------------------------------------------------------------
// Source tags
// ---------------------------------------------------------------------------

/// Which part of the system produced a log line. One tag per backend
/// endpoint plus one for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Routes,
    Statistics,
    Samples,
    System,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Routes => write!(f, "ROUTES"),
            Endpoint::Statistics => write!(f, "STATS"),
            Endpoint::Samples => write!(f, "SAMPLES"),
            Endpoint::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

/// Coarse class of a fetch failure, mapped straight off the error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Non-2xx status or connection-level failure: the backend or the
    /// network is degraded.
    Transport,
    /// The backend answered but reported its own failure.
    Backend,
    /// The body did not match the expected shape: an API change or a bug.
    Parse,
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureClass::Transport => write!(f, "TRANSPORT"),
            FailureClass::Backend => write!(f, "BACKEND"),
            FailureClass::Parse => write!(f, "PARSE"),
        }
    }
}

pub fn classify_fetch_failure(err: &FetchError) -> FailureClass {
    match err {
        FetchError::Http(_) | FetchError::Network(_) => FailureClass::Transport,
        FetchError::Backend(_) => FailureClass::Backend,
        FetchError::Parse(_) => FailureClass::Parse,
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>) {
        let logger = Logger {
            min_level,
            log_file,
        };

        *LOGGER.lock().unwrap() = Some(logger);
    }

    fn log(&self, level: LogLevel, source: Endpoint, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let log_entry = format!("{} {} {}: {}", timestamp, level, source, message);

        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", log_entry),
            LogLevel::Info | LogLevel::Debug => println!("{}", log_entry),
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>) {
    Logger::init(min_level, log_file.map(String::from));
}

/// Log a general informational message
pub fn info(source: Endpoint, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Info, source, message);
    }
}

/// Log a warning message
pub fn warn(source: Endpoint, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Warning, source, message);
    }
}

/// Log an error message
pub fn error(source: Endpoint, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Error, source, message);
    }
}

/// Log a debug message
pub fn debug(source: Endpoint, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Debug, source, message);
    }
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a fetch failure with automatic classification.
///
/// Transport and parse failures are errors (service or contract is
/// broken); backend-reported failures are warnings (the backend is up and
/// told us what is wrong, typically its database).
pub fn log_fetch_failure(endpoint: Endpoint, err: &FetchError) {
    let class = classify_fetch_failure(err);
    let message = format!("fetch failed [{}]: {}", class, err);

    match class {
        FailureClass::Transport | FailureClass::Parse => error(endpoint, &message),
        FailureClass::Backend => warn(endpoint, &message),
    }
}
