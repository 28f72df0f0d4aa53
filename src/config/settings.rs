use std::time::Duration;

use clap::ValueEnum;

use crate::utils::constants::DEFAULT_HTTP_TIMEOUT_SECS;

/// ================================
/// Runtime settings of a single run
/// ================================
#[derive(Debug, Clone)]
pub struct Settings {
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// per request, covers connect and body read
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Compact,
}

