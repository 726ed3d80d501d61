//! Rewriting providers for the redraft daemon.
//!
//! The orchestrator depends only on the [`RewriteProvider`] trait. This crate
//! supplies the trait, the [`RewriteDirective`] handed to every call, and
//! two implementations:
//!
//! - [`EchoProvider`] returns its input and needs no external service
//! - [`ProcessProvider`] runs an external executable that speaks a
//!   one-line JSON protocol on stdin and stdout
//!
//! Enabling the `test-support` feature adds `ScriptedProvider`, which
//! replays canned replies.

mod command;
mod directive;
mod echo;
mod error;
mod process;
mod protocol;
mod provider;
#[cfg(any(test, feature = "test-support"))]
mod scripted;

pub use command::{DEFAULT_TIMEOUT_SECS, ProviderCommand};
pub use directive::RewriteDirective;
pub use echo::EchoProvider;
pub use error::ProviderError;
pub use process::ProcessProvider;
pub use protocol::{ProviderRequest, ProviderResponse, REWRITE_OPERATION};
pub use provider::RewriteProvider;
#[cfg(any(test, feature = "test-support"))]
pub use scripted::{RecordedCall, ScriptedProvider, ScriptedReply};

#[cfg(test)]
mod tests;
