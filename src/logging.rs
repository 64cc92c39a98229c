//! Logging setup
//!
//! Logs go to stderr through a non-blocking writer; stdout is reserved for
//! replies. `RUST_LOG` wins over the defaults below when set.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Any value turns on debug logging
pub const DEBUG_ENV: &str = "SKILL_DEBUG";

/// `json` for one JSON object per event, anything else for text
pub const FORMAT_ENV: &str = "SKILL_LOG_FORMAT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub debug: bool,
    pub format: LogFormat,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::var(DEBUG_ENV).ok(), std::env::var(FORMAT_ENV).ok())
    }

    fn from_vars(debug: Option<String>, format: Option<String>) -> Self {
        let format = match format.as_deref().map(str::trim) {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Self {
            debug: debug.is_some_and(|v| !v.is_empty()),
            format,
        }
    }

    fn default_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

/// Install the global subscriber from the environment
///
/// Keep the returned guard alive for the life of the process, or buffered
/// lines are lost on exit.
pub fn init_logging() -> anyhow::Result<WorkerGuard> {
    init_with(LogSettings::from_env())
}

pub fn init_with(settings: LogSettings) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.default_directive()));
    let registry = tracing_subscriber::registry().with(filter);

    match settings.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init()?,
        LogFormat::Text => registry
            .with(fmt::layer().with_ansi(false).with_writer(writer))
            .try_init()?,
    }

    tracing::debug!("Logging initialized: {:?}", settings);
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = LogSettings::from_vars(None, None);
        assert_eq!(settings, LogSettings::default());
        assert_eq!(settings.default_directive(), "info");
    }

    #[test]
    fn test_debug_flag() {
        let settings = LogSettings::from_vars(Some("1".into()), None);
        assert!(settings.debug);
        assert_eq!(settings.default_directive(), "debug");

        assert!(!LogSettings::from_vars(Some(String::new()), None).debug);
    }

    #[test]
    fn test_format() {
        assert_eq!(
            LogSettings::from_vars(None, Some("JSON".into())).format,
            LogFormat::Json
        );
        assert_eq!(
            LogSettings::from_vars(None, Some("pretty".into())).format,
            LogFormat::Text
        );
    }
}
