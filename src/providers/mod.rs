/*!
 * Provider implementations of the translation capability.
 *
 * - Anthropic: Anthropic Messages API client
 * - Mock: Scripted translator for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A service that turns one source string into one translated string
///
/// Implementations must report rate limiting and overload as
/// `ProviderError::RateLimitExceeded` / `ProviderError::Overloaded` so the
/// driver can retry them, and everything else as a permanent error.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate a single source string
    ///
    /// # Arguments
    /// * `source` - The text to translate, exactly as it appears in the document
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The raw model output or an error
    async fn translate(&self, source: &str) -> Result<String, ProviderError>;
}

pub mod anthropic;
pub mod mock;
