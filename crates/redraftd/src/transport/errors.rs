//! Failures raised while binding or running the listener.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors surfaced by the socket listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The TCP host could not be resolved.
    #[error("failed to resolve {host}:{port}: {source}")]
    Resolve {
        /// Configured host.
        host: String,
        /// Configured port.
        port: u16,
        /// Resolver error.
        #[source]
        source: io::Error,
    },
    /// Resolution succeeded but produced no addresses.
    #[error("no addresses resolved for {host}:{port}")]
    ResolveEmpty {
        /// Configured host.
        host: String,
        /// Configured port.
        port: u16,
    },
    /// Binding the TCP listener failed.
    #[error("failed to bind TCP listener at {addr}: {source}")]
    BindTcp {
        /// Address that could not be bound.
        addr: SocketAddr,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Switching the listener to non-blocking mode failed.
    #[error("failed to make the listener non-blocking: {source}")]
    NonBlocking {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Unix sockets are not available on this platform.
    #[cfg(not(unix))]
    #[error("unix sockets are unsupported: {endpoint}")]
    UnsupportedUnix {
        /// Rendered endpoint.
        endpoint: String,
    },
    /// Binding the Unix listener failed.
    #[cfg(unix)]
    #[error("failed to bind unix listener at {path}: {source}")]
    BindUnix {
        /// Socket path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Another process is serving the socket.
    #[cfg(unix)]
    #[error("unix socket {path} is already in use")]
    UnixInUse {
        /// Socket path.
        path: String,
    },
    /// A non-socket file occupies the socket path.
    #[cfg(unix)]
    #[error("{path} exists and is not a socket")]
    UnixNotSocket {
        /// Occupied path.
        path: String,
    },
    /// Inspecting an existing socket file failed.
    #[cfg(unix)]
    #[error("failed to inspect {path}: {source}")]
    UnixInspect {
        /// Socket path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Removing a stale socket file failed.
    #[cfg(unix)]
    #[error("failed to remove stale socket {path}: {source}")]
    UnixCleanup {
        /// Socket path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The accept loop panicked.
    #[error("listener thread panicked")]
    ThreadPanic,
}
