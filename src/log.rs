//! Optional stderr diagnostics for the accumulator.
//!
//! The level is read once from `FAULTS_LOG` and defaults to errors only.

use std::env;
use std::sync::LazyLock;

use tracing_subscriber::EnvFilter;

use crate::error::LoggingError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Level {
    fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "error" | "err" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "info" => Self::Info,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Error,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    fn directive(self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.as_str())
    }
}

static FAULTS_LOG: LazyLock<Level> = LazyLock::new(|| {
    env::var("FAULTS_LOG")
        .map(|s| Level::parse(&s))
        .unwrap_or(Level::Error)
});

/// Fails if a global subscriber is already set, including by an earlier call.
pub fn init() -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(FAULTS_LOG.directive()))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| LoggingError::SetGlobal(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{Level, init};

    #[test]
    fn test_parse_accepts_aliases() {
        assert_eq!(Level::parse("err"), Level::Error);
        assert_eq!(Level::parse("warning"), Level::Warn);
        assert_eq!(Level::parse(" DEBUG "), Level::Debug);
        assert_eq!(Level::parse("trace"), Level::Trace);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_error() {
        assert_eq!(Level::parse("verbose"), Level::Error);
        assert_eq!(Level::parse(""), Level::Error);
    }

    #[test]
    fn test_directive_scopes_to_crate() {
        assert_eq!(Level::Info.directive(), "faults=info");
    }

    #[test]
    fn test_second_init_fails() {
        // Only this test installs a global subscriber in the test binary.
        assert!(init().is_ok());
        assert!(init().is_err());
    }
}
