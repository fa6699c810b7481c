//! Tracing subscriber setup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::ClinicConfig;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}

pub type LoggingResult<T> = Result<T, LoggingError>;

fn parse_filter(level: &str) -> LoggingResult<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidFilter {
        filter: level.to_string(),
        reason: e.to_string(),
    })
}

/// Install a global fmt subscriber.
///
/// `level` (e.g. `"info"` or `"clinic_core=debug"`) must parse even when
/// `RUST_LOG` is set, since `RUST_LOG` wins over it.
pub fn init_logging(level: &str) -> LoggingResult<()> {
    let fallback = parse_filter(level)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or(fallback);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}

/// Install the subscriber at the config's `log_level`.
pub fn init_from_config(config: &ClinicConfig) -> LoggingResult<()> {
    init_logging(&config.log_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        let _ = init_logging("debug");
        assert!(matches!(
            init_logging("debug"),
            Err(LoggingError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_invalid_filter() {
        let err = init_logging("clinic_core=loudest").unwrap_err();
        match err {
            LoggingError::InvalidFilter { filter, .. } => assert_eq!(filter, "clinic_core=loudest"),
            other => panic!("expected InvalidFilter, got {other:?}"),
        }
    }

    #[test]
    fn test_init_from_config_uses_log_level() {
        let config = ClinicConfig {
            log_level: "clinic_core=loudest".to_string(),
            ..ClinicConfig::default()
        };
        assert!(matches!(
            init_from_config(&config),
            Err(LoggingError::InvalidFilter { .. })
        ));

        let config = ClinicConfig {
            log_level: "warn".to_string(),
            ..ClinicConfig::default()
        };
        let _ = init_from_config(&config);
        assert!(matches!(
            init_from_config(&config),
            Err(LoggingError::AlreadyInitialized)
        ));
    }
}
