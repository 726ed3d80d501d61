//! Selection of the rewriting provider.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Rewriting provider the daemon drives.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProviderKind {
    /// Returns the input unchanged. Deterministic and offline.
    #[default]
    Echo,
    /// Spawns `provider_executable` and talks JSONL over its stdio.
    Process,
}

/// Errors encountered while parsing a [`ProviderKind`] from text.
pub type ProviderKindParseError = strum::ParseError;
