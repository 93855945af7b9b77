/*!
 * Translation of the store's pending records using an AI provider.
 *
 * - `driver`: Walks untranslated records, validates and commits responses,
 *   and checkpoints the store
 * - `retry`: Backoff schedules for rate limiting and overload
 * - `prompts`: The system instruction sent with every request
 */

// Re-export main types for easier usage
pub use self::driver::{DriverConfig, TranslationDriver, TranslationSummary};
pub use self::retry::{Retried, RetryPolicy};

// Submodules
pub mod driver;
pub mod prompts;
pub mod retry;
