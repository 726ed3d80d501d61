//! Description of an external provider executable.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default allowance for one provider invocation.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How to launch a provider process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCommand {
    name: String,
    executable: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl ProviderCommand {
    /// Describes `executable`, named `name` in logs and errors.
    #[must_use]
    pub fn new(name: impl Into<String>, executable: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            executable: executable.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the command-line arguments.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the per-invocation timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Provider name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Executable path or bare command name.
    #[must_use]
    pub fn executable(&self) -> &Path {
        self.executable.as_path()
    }

    /// Command-line arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Per-invocation timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}
