//! Provider factory returning a shared scripted provider.

use std::sync::Arc;

use redraft_config::Config;
use redraft_providers::{RewriteProvider, ScriptedProvider, ScriptedReply};

use crate::bootstrap::ProviderFactory;

/// Hands every daemon the same scripted provider so tests can inspect calls.
#[derive(Clone)]
pub(crate) struct ScriptedProviderFactory {
    provider: Arc<ScriptedProvider>,
}

impl ScriptedProviderFactory {
    pub(crate) fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            provider: Arc::new(ScriptedProvider::new(replies)),
        }
    }

    pub(crate) fn provider(&self) -> &ScriptedProvider {
        &self.provider
    }
}

impl ProviderFactory for ScriptedProviderFactory {
    fn build(&self, _config: &Config) -> Arc<dyn RewriteProvider> {
        self.provider.clone()
    }
}
