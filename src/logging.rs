use anyhow::Result;
use log::{LevelFilter, debug};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LogLevel {
    None,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl From<&str> for LogLevel {
    fn from(level: &str) -> Self {
        match level.to_lowercase().as_str() {
            "none" | "off" => LogLevel::None,
            "errors" | "error" => LogLevel::Errors,
            "warnings" | "warn" => LogLevel::Warnings,
            "debug" => LogLevel::Debug,
            "trace" | "events" => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::None => LevelFilter::Off,
            LogLevel::Errors => LevelFilter::Error,
            LogLevel::Warnings => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Install the global logger. `RUST_LOG` still applies to anything the level
/// override does not cover.
pub fn init(level: LogLevel) -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_level(LevelFilter::from(level))
        .try_init()?;

    debug!("logger initialised at {:?}", level);

    Ok(())
}
