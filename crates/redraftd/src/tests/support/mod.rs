//! Shared doubles for daemon tests.

mod config_loader;
mod providers;
mod reporter;
mod world;

pub(crate) use self::reporter::{HealthEvent, RecordingHealthReporter};
pub(crate) use self::world::{QuotedString, TestWorld, world};
