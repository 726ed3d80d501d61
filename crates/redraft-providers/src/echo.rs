//! Identity provider.

use crate::directive::RewriteDirective;
use crate::error::ProviderError;
use crate::provider::RewriteProvider;

/// Returns the input unchanged.
///
/// Every protected span trivially survives, so the daemon can run end to
/// end without an external rewriting service.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoProvider;

impl RewriteProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn rewrite(&self, text: &str, _directive: &RewriteDirective) -> Result<String, ProviderError> {
        Ok(text.to_owned())
    }
}
