use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Custom logger structure
#[derive(Debug)]
struct RallyLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl RallyLogger {
    // Debug and trace records are limited to the selected topics, if any
    fn topic_enabled(&self, metadata: &Metadata) -> bool {
        match &self.debug_filters {
            Some(filters) if metadata.level() >= log::Level::Debug => {
                filters.contains(metadata.target())
                    || filters.iter().any(|f| metadata.target().starts_with(f.as_str()))
            }
            _ => true,
        }
    }
}

impl log::Log for RallyLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && self.topic_enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let message = record.args().to_string();
        let (context, message) = split_context(&message);
        let context = if context.is_empty() {
            String::new()
        } else {
            format!("{} ", context)
        };

        let line = format!(
            "{timestamp} {level_color}{level:5}{reset} {context}{target}: {message}",
            level = record.level(),
            target = record.target(),
        );

        // Logging must never take the simulation down
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", line);
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Lifts leading `[M0001]`-style context tags out of a message.
/// Returns (context, remaining message).
pub(crate) fn split_context(message: &str) -> (&str, &str) {
    let mut end = 0;
    let bytes = message.as_bytes();
    while end < bytes.len() && bytes[end] == b'[' {
        match message[end..].find(']') {
            Some(close) => end += close + 1,
            None => break,
        }
    }
    (&message[..end], message[end..].trim_start())
}

static LOGGER: OnceLock<RallyLogger> = OnceLock::new();

// Initialize the logger with optional debug topic filters
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let debug_filters = debug_filter.map(|filter_str| {
        filter_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<String>>()
    });

    let logger = LOGGER.get_or_init(|| RallyLogger {
        level,
        debug_filters,
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

/// Parses a `--log-level` value, falling back to info
pub fn parse_level(value: &str) -> LevelFilter {
    match value.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

// Helper macros for specific debug topics
#[macro_export]
macro_rules! debug_rally {
    ($match_id:expr, $point:expr, $($arg:tt)*) => {
        log::debug!(target: "rally", "[M{:04}][P{:03}] {}", $match_id, $point, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_strategy {
    ($($arg:tt)*) => {
        log::debug!(target: "strategy", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_score {
    ($match_id:expr, $($arg:tt)*) => {
        log::debug!(target: "score", "[M{:04}] {}", $match_id, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_sweep {
    ($($arg:tt)*) => {
        log::debug!(target: "sweep", "{}", format_args!($($arg)*))
    };
}
