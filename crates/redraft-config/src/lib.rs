//! Shared configuration for the redraft daemon.
//!
//! Values are layered by `ortho_config`: built-in defaults, then a TOML file
//! named by `--config-path` or `REDRAFT_CONFIG_PATH`, then `REDRAFT_*`
//! environment variables, then command-line flags.

mod defaults;
mod logging;
mod provider;
mod socket;

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_ATTEMPTS, DEFAULT_PROVIDER_EXECUTABLE,
    DEFAULT_PROVIDER_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TCP_PORT,
    default_log_filter, default_log_filter_string, default_log_format,
    default_provider_executable, default_provider_kind, default_socket_endpoint,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use provider::{ProviderKind, ProviderKindParseError};
pub use socket::{SocketEndpoint, SocketParseError, SocketPreparationError};

/// Resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "REDRAFT")]
pub struct Config {
    /// Socket the daemon listens on.
    #[ortho_config(default = defaults::default_socket_endpoint())]
    pub daemon_socket: SocketEndpoint,
    /// `tracing` filter directive.
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
    /// Provider calls allowed per revision request.
    #[ortho_config(default = defaults::DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
    /// Wall-clock budget for one revision request, in seconds.
    #[ortho_config(default = defaults::DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
    /// Rewriting provider.
    #[ortho_config(default = defaults::default_provider_kind())]
    pub provider: ProviderKind,
    /// Executable spawned by the process provider.
    #[ortho_config(default = defaults::default_provider_executable())]
    pub provider_executable: Utf8PathBuf,
    /// Upper bound for one provider invocation, in seconds.
    #[ortho_config(default = defaults::DEFAULT_PROVIDER_TIMEOUT_SECS)]
    pub provider_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            daemon_socket: defaults::default_socket_endpoint(),
            log_filter: defaults::default_log_filter_string(),
            log_format: defaults::default_log_format(),
            max_attempts: defaults::DEFAULT_MAX_ATTEMPTS,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            provider: defaults::default_provider_kind(),
            provider_executable: defaults::default_provider_executable(),
            provider_timeout_secs: defaults::DEFAULT_PROVIDER_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Socket the daemon listens on.
    #[must_use]
    pub const fn daemon_socket(&self) -> &SocketEndpoint {
        &self.daemon_socket
    }

    /// `tracing` filter directive.
    #[must_use]
    pub const fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Provider calls allowed per request; never less than one.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Wall-clock budget for one revision request.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Rewriting provider.
    #[must_use]
    pub const fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Executable spawned by the process provider.
    #[must_use]
    pub fn provider_executable(&self) -> &Utf8Path {
        self.provider_executable.as_path()
    }

    /// Upper bound for one provider invocation.
    #[must_use]
    pub const fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.max_attempts(), 3);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
        assert_eq!(config.provider_timeout(), Duration::from_secs(30));
        assert_eq!(config.provider(), ProviderKind::Echo);
        assert_eq!(config.provider_executable(), "redraft-provider");
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn zero_attempts_are_raised_to_one() {
        let config = Config {
            max_attempts: 0,
            ..Config::default()
        };
        assert_eq!(config.max_attempts(), 1);
    }
}
