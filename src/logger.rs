//! Custom logging module.
//!
//! This module provides a custom logger implementation that captures log entries
//! and forwards them to the application state for display in the UI.

use log::{Level, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Custom logger that captures logs to state
///
pub struct StateLogger {
    log_callback: Arc<Mutex<Option<Box<dyn Fn(String) + Send + Sync>>>>,
}

impl StateLogger {
    pub fn new() -> Self {
        StateLogger {
            log_callback: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_log_callback(&self, callback: Box<dyn Fn(String) + Send + Sync>) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
        // If the lock fails the logger still works, it just won't capture
        // entries into state.
    }
}

impl Default for StateLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for StateLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(callback) = self.log_callback.lock() {
                if let Some(ref cb) = *callback {
                    let formatted = format_log(record);
                    cb(formatted);
                }
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_callback_receives_entries() {
        let logger = StateLogger::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        logger.set_log_callback(Box::new(move |_entry| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        }));

        logger.log(
            &Record::builder()
                .args(format_args!("board list loaded"))
                .level(Level::Info)
                .build(),
        );
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_format_log_contains_level_and_message() {
        let formatted = format_log(
            &Record::builder()
                .args(format_args!("persistence write dropped"))
                .level(Level::Warn)
                .build(),
        );
        assert!(formatted.contains("WARN"));
        assert!(formatted.contains("persistence write dropped"));
    }
}
