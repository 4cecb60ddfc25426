//! Tracing setup for the service.
//!
//! Credential events are emitted under [`CREDENTIALS_TARGET`] so operators
//! can keep or drop them independently of the general level, e.g.
//! `RUST_LOG=warn,streamauth::credentials=info`.

use std::{fs::OpenOptions, sync::Arc};

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Target of every per-request credential event
pub const CREDENTIALS_TARGET: &str = "streamauth::credentials";

/// Initialize structured logging based on configuration
///
/// `RUST_LOG` takes precedence over the configured directives.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let directives = default_directives(config)?;
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&directives))?;

    let (writer, ansi) = match &config.file_path {
        Some(file_path) => {
            let file = OpenOptions::new().create(true).append(true).open(file_path)?;
            (BoxMakeWriter::new(Arc::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stdout), true),
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.format.as_str() == "json" {
        let json_layer = fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true)
            .with_writer(writer);
        registry.with(json_layer).try_init()?;
    } else {
        let pretty_layer = fmt::layer()
            .pretty()
            .with_target(true)
            .with_line_number(false)
            .with_file(false)
            .with_ansi(ansi)
            .with_writer(writer);
        registry.with(pretty_layer).try_init()?;
    }

    Ok(())
}

/// Filter directives used when `RUST_LOG` is unset: the configured level,
/// plus credential events at `info` unless they are switched off.
fn default_directives(config: &LoggingConfig) -> anyhow::Result<String> {
    let level = parse_log_level(&config.level)?;
    let credentials = if config.show_credentials { "info" } else { "off" };

    Ok(format!(
        "{},{CREDENTIALS_TARGET}={credentials}",
        level.as_str().to_lowercase()
    ))
}

/// Parse log level string to tracing Level
fn parse_log_level(level: &str) -> anyhow::Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(anyhow::anyhow!("Invalid log level: {level}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str, show_credentials: bool) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            show_credentials,
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
        assert!(parse_log_level("info").is_ok());
        assert!(parse_log_level("error").is_ok());
        assert!(parse_log_level("invalid").is_err());
    }

    #[test]
    fn test_credential_events_kept_above_configured_level() {
        assert_eq!(
            default_directives(&logging("WARN", true)).unwrap(),
            "warn,streamauth::credentials=info"
        );
        assert_eq!(
            default_directives(&logging("warning", true)).unwrap(),
            "warn,streamauth::credentials=info"
        );
    }

    #[test]
    fn test_credential_events_can_be_silenced() {
        assert_eq!(
            default_directives(&logging("debug", false)).unwrap(),
            "debug,streamauth::credentials=off"
        );
    }

    #[test]
    fn test_directives_parse_as_filter() {
        let directives = default_directives(&LoggingConfig::default()).unwrap();
        assert!(EnvFilter::try_new(directives).is_ok());
        assert!(default_directives(&logging("loud", true)).is_err());
    }
}
