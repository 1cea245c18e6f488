use std::sync::atomic::{AtomicU8, Ordering};

pub use chrono;

pub static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl Level {
    /// Unknown names fall back to `Info`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" => Level::Error,
            "warn" => Level::Warn,
            "info" => Level::Info,
            "debug" => Level::Debug,
            "trace" => Level::Trace,
            _ => Level::Info,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31mERROR\x1b[0m",
            Level::Warn => "\x1b[33mWARN \x1b[0m",
            Level::Info => "\x1b[32mINFO \x1b[0m",
            Level::Debug => "\x1b[34mDEBUG\x1b[0m",
            Level::Trace => "\x1b[36mTRACE\x1b[0m",
        }
    }
}

/// Set the global level from `RUST_LOG`.
pub fn init() {
    let level = match std::env::var("RUST_LOG") {
        Err(_) => Level::Info,
        Ok(value) => Level::from_name(&value),
    };

    set_level(level);
}

pub fn set_level(level: Level) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn enabled(level: Level) -> bool {
    LOG_LEVEL.load(Ordering::Relaxed) >= level as u8
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{ $crate::format_log!($crate::Level::Error, $($arg)*) }}
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{ $crate::format_log!($crate::Level::Warn, $($arg)*) }}
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{ $crate::format_log!($crate::Level::Info, $($arg)*) }}
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{ $crate::format_log!($crate::Level::Debug, $($arg)*) }}
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{ $crate::format_log!($crate::Level::Trace, $($arg)*) }}
}

#[macro_export]
macro_rules! format_log {
    ($level:expr, $($arg:tt)*) => {{
        let level: $crate::Level = $level;

        if $crate::enabled(level) {
            // [2023-09-19T18:10:27Z INFO  serve::server] resolved /index to ./index.json
            eprintln!(
                "[{timestamp} {log_level} {module_path}] {msg}",
                timestamp = $crate::chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                log_level = level.label(),
                module_path = std::module_path!(),
                msg = format_args!($($arg)*),
            );
        }
    }};
}
