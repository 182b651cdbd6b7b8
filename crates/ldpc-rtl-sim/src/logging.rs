//! Logging initialization
//!
//! Thin wrapper over the `tracing` subscriber: a default level that can be
//! overridden through `RUST_LOG`.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Default log level for the testbench binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-edge detail
    Trace,
    /// Per-encode detail
    Debug,
    /// Run summaries (default)
    Info,
    /// Problems only
    Warn,
    /// Failures only
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `level`; calling
/// twice is harmless.
pub fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_display() {
        assert_eq!(LogLevel::Debug.to_string(), "debug");
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_double_init_is_harmless() {
        init_logging(LogLevel::Warn);
        init_logging(LogLevel::Debug);
    }
}
