//! Socket transport for the daemon.
//!
//! A `SocketListener` binds the configured endpoint and hands every
//! accepted connection to a `ConnectionHandler` on its own thread.

mod errors;
mod listener;
mod stream;
#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

pub use self::errors::ListenerError;
pub(crate) use self::listener::SocketListener;
pub(crate) use self::stream::{ConnectionHandler, ConnectionStream};
#[cfg(test)]
pub(crate) use self::test_utils::{RecordingHandler, wait_for};

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
