use std::time::Duration;

use docscan_core::extraction::command::DEFAULT_TIMEOUT;

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "docscan=info,docscan_cli=info,docscan_core=info";

/// Log line format written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// CLI configuration loaded from environment variables.
///
/// Command-line flags take precedence over every value here.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Extractor command line used by `extract` (default: unset).
    pub extractor_cmd: Option<String>,
    /// Extractor timeout (default: `120` seconds).
    pub extractor_timeout: Duration,
    /// Log format (default: `text`).
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                          | Default |
    /// |----------------------------------|---------|
    /// | `DOCSCAN_EXTRACTOR_CMD`          | unset   |
    /// | `DOCSCAN_EXTRACTOR_TIMEOUT_SECS` | `120`   |
    /// | `DOCSCAN_LOG_FORMAT`             | `text`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let extractor_cmd = lookup("DOCSCAN_EXTRACTOR_CMD")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let extractor_timeout = match lookup("DOCSCAN_EXTRACTOR_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "DOCSCAN_EXTRACTOR_TIMEOUT_SECS",
                        value: raw,
                        reason: "expected a positive number of seconds",
                    })
                }
            },
        };

        let log_format = match lookup("DOCSCAN_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    var: "DOCSCAN_LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected `text` or `json`",
                })
            }
        };

        Ok(Self {
            extractor_cmd,
            extractor_timeout,
            log_format,
        })
    }
}
