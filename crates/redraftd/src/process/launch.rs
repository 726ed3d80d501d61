//! Runs the daemon until a shutdown signal arrives.

use std::sync::Arc;

use tracing::info;

use redraft_config::SocketEndpoint;

use crate::bootstrap::{
    ConfigLoader, ConfiguredProviderFactory, ProviderFactory, SystemConfigLoader, bootstrap_with,
};
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::transport::SocketListener;

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};

/// Collaborators for one daemon run.
pub(crate) struct LaunchPlan<L, F, S> {
    pub(crate) loader: L,
    pub(crate) providers: F,
    pub(crate) reporter: Arc<dyn HealthReporter>,
    pub(crate) shutdown: S,
}

/// Runs the daemon with the production collaborators.
///
/// # Errors
///
/// Returns a [`LaunchError`] when bootstrap, binding, or signal handling
/// fails.
pub fn run_daemon() -> Result<(), LaunchError> {
    run_daemon_with(LaunchPlan {
        loader: SystemConfigLoader,
        providers: ConfiguredProviderFactory,
        reporter: Arc::new(StructuredHealthReporter::new()),
        shutdown: SystemShutdownSignal,
    })
}

pub(crate) fn run_daemon_with<L, F, S>(plan: LaunchPlan<L, F, S>) -> Result<(), LaunchError>
where
    L: ConfigLoader,
    F: ProviderFactory,
    S: ShutdownSignal,
{
    let LaunchPlan {
        loader,
        providers,
        reporter,
        shutdown,
    } = plan;

    let daemon = bootstrap_with(&loader, reporter.as_ref(), &providers)?;
    let (config, handler) = daemon.into_parts();
    let listener = SocketListener::bind(config.daemon_socket())?;
    let endpoint = bound_endpoint(&listener, config.daemon_socket());
    let handle = listener.start(Arc::new(handler))?;
    reporter.serving(&endpoint);

    let waited = shutdown.wait();
    reporter.stopping();
    handle.shutdown();
    handle.join()?;
    waited?;
    info!(target: PROCESS_TARGET, "shutdown complete");
    Ok(())
}

/// Resolves ephemeral TCP ports to the port actually bound.
fn bound_endpoint(listener: &SocketListener, configured: &SocketEndpoint) -> SocketEndpoint {
    listener.local_addr().map_or_else(
        || configured.clone(),
        |addr| SocketEndpoint::tcp(addr.ip().to_string(), addr.port()),
    )
}
