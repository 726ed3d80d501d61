//! Daemon bootstrap: configuration, logging, socket directory, provider.

use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use redraft_config::{Config, ProviderKind, SocketPreparationError};
use redraft_providers::{EchoProvider, ProcessProvider, ProviderCommand, RewriteProvider};

use crate::dispatch::{ApiRouter, DispatchConnectionHandler};
use crate::health::HealthReporter;
use crate::revision::{Orchestrator, RevisionPolicy};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Source of the daemon configuration.
pub trait ConfigLoader: Send + Sync {
    /// Loads the configuration.
    ///
    /// # Errors
    ///
    /// Returns the loader's error when no valid configuration is available.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader backed by [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Builds the rewriting provider for a configuration.
pub trait ProviderFactory: Send + Sync {
    /// Returns the provider that will serve every request.
    fn build(&self, config: &Config) -> Arc<dyn RewriteProvider>;
}

/// Factory that honours [`Config::provider`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfiguredProviderFactory;

impl ProviderFactory for ConfiguredProviderFactory {
    fn build(&self, config: &Config) -> Arc<dyn RewriteProvider> {
        match config.provider() {
            ProviderKind::Echo => Arc::new(EchoProvider),
            ProviderKind::Process => {
                let command = ProviderCommand::new(
                    ProviderKind::Process.to_string(),
                    config.provider_executable().as_std_path(),
                )
                .with_timeout(config.provider_timeout());
                Arc::new(ProcessProvider::new(command))
            }
        }
    }
}

/// Errors that stop the daemon from starting.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Logging could not be configured.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The socket directory could not be prepared.
    #[error("failed to prepare daemon socket: {source}")]
    Socket {
        /// Filesystem error.
        #[source]
        source: SocketPreparationError,
    },
}

/// A configured daemon ready to serve requests.
pub struct Daemon {
    config: Config,
    telemetry: TelemetryHandle,
    provider_name: String,
    router: ApiRouter,
}

impl Daemon {
    /// The resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Handle for the installed subscriber.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Name of the active rewriting provider.
    #[must_use]
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Router that answers requests.
    #[must_use]
    pub const fn router(&self) -> &ApiRouter {
        &self.router
    }

    pub(crate) fn into_parts(self) -> (Config, DispatchConnectionHandler) {
        (self.config, DispatchConnectionHandler::new(self.router))
    }
}

/// Runs the bootstrap sequence with injected collaborators.
///
/// Each stage reports to `reporter`; the first failure is reported and
/// returned.
///
/// # Errors
///
/// Returns a [`BootstrapError`] naming the stage that failed.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: &dyn HealthReporter,
    providers: &dyn ProviderFactory,
) -> Result<Daemon, BootstrapError> {
    reporter.bootstrap_starting();
    let result = prepare(loader, providers);
    match &result {
        Ok(daemon) => reporter.bootstrap_succeeded(&daemon.config, &daemon.provider_name),
        Err(error) => reporter.bootstrap_failed(error),
    }
    result
}

fn prepare(
    loader: &dyn ConfigLoader,
    providers: &dyn ProviderFactory,
) -> Result<Daemon, BootstrapError> {
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    let telemetry =
        telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;
    config
        .daemon_socket()
        .prepare_filesystem()
        .map_err(|source| BootstrapError::Socket { source })?;

    let provider = providers.build(&config);
    let provider_name = provider.name().to_owned();
    let policy = RevisionPolicy::new(config.max_attempts(), config.request_timeout());
    let router = ApiRouter::new(Orchestrator::new(provider, policy));

    Ok(Daemon {
        config,
        telemetry,
        provider_name,
        router,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_is_the_default_provider() {
        let provider = ConfiguredProviderFactory.build(&Config::default());
        assert_eq!(provider.name(), "echo");
    }

    #[test]
    fn process_provider_uses_the_configured_executable() {
        let config = Config {
            provider: ProviderKind::Process,
            provider_executable: "/opt/rewriter/bin/rewrite".into(),
            ..Config::default()
        };
        let provider = ConfiguredProviderFactory.build(&config);
        assert_eq!(provider.name(), "process");
    }
}
