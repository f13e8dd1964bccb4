//! Log subscriber setup for hosts embedding a timeline.
//!
//! The library itself only emits `tracing` events. Hosts that have no
//! subscriber of their own can install one here.

use tracing_subscriber::EnvFilter;

use crate::errors::{Result, TimelineError};

/// Output format for [`init_tracing_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Parses a filter directive such as `"boot_timeline=debug"`.
///
/// The process environment is never consulted.
pub fn filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| TimelineError::Config(format!("invalid log directive '{directive}': {e}")))
}

/// Installs a pretty fmt subscriber filtered by `directive`.
pub fn init_tracing(directive: &str) -> Result<()> {
    init_tracing_with(directive, LogFormat::Pretty)
}

/// Installs a fmt subscriber in `format`, filtered by `directive`.
///
/// Fails if the directive does not parse or a global subscriber is already set.
pub fn init_tracing_with(directive: &str, format: LogFormat) -> Result<()> {
    let filter = filter(directive)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| TimelineError::Config(format!("tracing already initialized: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parses_directives() {
        assert!(filter("boot_timeline=debug").is_ok());
        assert!(filter("info").is_ok());
    }

    #[test]
    fn test_filter_rejects_unknown_level() {
        let err = filter("boot_timeline=loud").unwrap_err();
        assert!(matches!(err, TimelineError::Config(_)));
    }

    #[test]
    fn test_second_init_fails() {
        let first = init_tracing("warn");
        let second = init_tracing_with("warn", LogFormat::Json);
        assert!(first.is_ok());
        assert!(second.is_err());
    }
}
