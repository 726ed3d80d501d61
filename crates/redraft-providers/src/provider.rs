//! The rewriting capability consumed by the revision orchestrator.

use std::sync::Arc;

use crate::directive::RewriteDirective;
use crate::error::ProviderError;

/// Produces a candidate revision of `text` under a directive.
///
/// Implementations must be callable from several request threads at once.
///
/// # Example
///
/// ```
/// use redraft_providers::{ProviderError, RewriteDirective, RewriteProvider};
///
/// struct Shouty;
///
/// impl RewriteProvider for Shouty {
///     fn name(&self) -> &str {
///         "shouty"
///     }
///
///     fn rewrite(&self, text: &str, _directive: &RewriteDirective) -> Result<String, ProviderError> {
///         Ok(text.to_uppercase())
///     }
/// }
/// ```
pub trait RewriteProvider: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Rewrites `text`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when no candidate could be obtained.
    fn rewrite(&self, text: &str, directive: &RewriteDirective) -> Result<String, ProviderError>;
}

impl<P: RewriteProvider + ?Sized> RewriteProvider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn rewrite(&self, text: &str, directive: &RewriteDirective) -> Result<String, ProviderError> {
        (**self).rewrite(text, directive)
    }
}

impl<P: RewriteProvider + ?Sized> RewriteProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn rewrite(&self, text: &str, directive: &RewriteDirective) -> Result<String, ProviderError> {
        (**self).rewrite(text, directive)
    }
}
