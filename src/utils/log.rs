//! Log Module

use colored::Colorize;
use std::sync::{Once, RwLock};

static INIT: Once = Once::new();
static LOG_LEVEL: RwLock<LogLevel> = RwLock::new(LogLevel::Log);

/// This enum is used to represent the different log levels
#[derive(PartialEq, PartialOrd, Debug, Clone, Copy)]
pub enum LogLevel {
    Debug,
    Info,
    Log,
    Warn,
    Error,
}

impl LogLevel {
    /// Parses a level name as accepted by `PIMAKE_LOG_LEVEL`
    pub fn from_name(name: &str) -> Option<LogLevel> {
        match name {
            "Debug" => Some(LogLevel::Debug),
            "Info" => Some(LogLevel::Info),
            "Log" => Some(LogLevel::Log),
            "Warn" => Some(LogLevel::Warn),
            "Error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Initializes the log level, which is called only once when the program starts
fn init_log_level() {
    let level = std::env::var("PIMAKE_LOG_LEVEL").unwrap_or_default();
    let log_level = LogLevel::from_name(&level).unwrap_or(LogLevel::Log);

    let mut write_lock = LOG_LEVEL.write().unwrap_or_else(|e| e.into_inner());
    *write_lock = log_level;
}

/// This function is used to log messages to the console
/// # Arguments
/// * `level` - The log level of the message
/// * `message` - The message to log
/// # Example
/// ```
/// use pimake::utils::log::{log, LogLevel};
/// log(LogLevel::Info, "Hello World!");
/// ```
///
/// # Level setting
/// The log level can be set by setting the environment variable `PIMAKE_LOG_LEVEL`
/// to one of the following values:
/// * `Debug`
/// * `Info`
/// * `Log`
/// * `Warn`
/// * `Error`
///
/// If the environment variable is not set, the default log level is `Log`
pub fn log(level: LogLevel, message: &str) {
    INIT.call_once(|| {
        init_log_level();
    });
    let level_str = match level {
        LogLevel::Debug => "[DEBUG]".purple(),
        LogLevel::Info => "[INFO]".blue(),
        LogLevel::Log => "[LOG]".green(),
        LogLevel::Warn => "[WARN]".yellow(),
        LogLevel::Error => "[ERROR]".red(),
    };
    if level >= *LOG_LEVEL.read().unwrap_or_else(|e| e.into_inner()) {
        println!("{} {}", level_str, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_parse() {
        assert_eq!(LogLevel::from_name("Warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_name("warn"), None);
        assert!(LogLevel::Debug < LogLevel::Error);
    }
}
