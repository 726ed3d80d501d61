use camino::Utf8PathBuf;
#[cfg(unix)]
use std::env;

#[cfg(unix)]
use libc::geteuid;

#[cfg(unix)]
use dirs::runtime_dir;

use crate::logging::LogFormat;
use crate::provider::ProviderKind;
use crate::socket::SocketEndpoint;

/// Default TCP port used when Unix domain sockets are not available.
pub const DEFAULT_TCP_PORT: u16 = 9787;

/// Default log filter expression used by the daemon.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Provider calls allowed per revision request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Wall-clock budget for one revision request, across all attempts.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Upper bound for a single provider process invocation.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Executable spawned by the process provider when none is configured.
pub const DEFAULT_PROVIDER_EXECUTABLE: &str = "redraft-provider";

/// Default log filter expression used by the daemon.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the daemon.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default rewriting provider.
#[must_use]
pub const fn default_provider_kind() -> ProviderKind {
    ProviderKind::Echo
}

/// Default provider executable, resolved through `PATH` at spawn time.
#[must_use]
pub fn default_provider_executable() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_PROVIDER_EXECUTABLE)
}

/// Computes the default socket endpoint for the daemon.
#[must_use]
pub fn default_socket_endpoint() -> SocketEndpoint {
    default_socket_endpoint_inner()
}

#[cfg(unix)]
fn default_socket_endpoint_inner() -> SocketEndpoint {
    let (mut base, apply_namespace) = match runtime_base_directory() {
        Some(dir) => (dir, false),
        None => (fallback_base_directory(), true),
    };

    base.push("redraft");
    if apply_namespace {
        base.push(user_namespace());
    }

    SocketEndpoint::unix(base.join("redraftd.sock"))
}

#[cfg(unix)]
fn runtime_base_directory() -> Option<Utf8PathBuf> {
    runtime_dir().and_then(|path| Utf8PathBuf::from_path_buf(path).ok())
}

#[cfg(unix)]
fn fallback_base_directory() -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(env::temp_dir()).unwrap_or_else(|_| Utf8PathBuf::from("/tmp"))
}

#[cfg(unix)]
fn user_namespace() -> String {
    // SAFETY: `geteuid` has no preconditions and cannot fail.
    let uid = unsafe { geteuid() };
    format!("uid-{uid}")
}

#[cfg(not(unix))]
fn default_socket_endpoint_inner() -> SocketEndpoint {
    SocketEndpoint::tcp("127.0.0.1", DEFAULT_TCP_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn default_socket_lives_in_a_redraft_directory() {
        let endpoint = default_socket_endpoint();
        let path = endpoint.unix_path().expect("unix endpoint by default");
        assert_eq!(path.file_name(), Some("redraftd.sock"));
        assert!(path.as_str().contains("redraft"));
    }
}
