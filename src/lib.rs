/*!
 * # snbt-trans - Quest-book translation with AI
 *
 * A Rust library for translating the description text of SNBT quest books.
 *
 * ## Features
 *
 * - Extract description strings from SNBT files
 * - Keep translation state in a JSON store that is merged, never rebuilt
 * - Translate missing entries with the Anthropic API, with retry, rate-limit
 *   backoff, response validation and periodic checkpoints
 * - Apply translations back into the original files, touching nothing but
 *   the description literals
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `snbt`: Quest-book documents:
 *   - `snbt::extractor`: Description string extraction
 *   - `snbt::substitution`: Writing translations back
 * - `store`: The translation store and its file format
 * - `translation`: Translation runs:
 *   - `translation::driver`: Walking and committing pending records
 *   - `translation::retry`: Backoff for rate limiting and overload
 *   - `translation::prompts`: System instruction text
 * - `validation`: Response acceptance rules
 * - `providers`: The `Translator` capability and its implementations:
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::mock`: Scripted translator
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod snbt;
pub mod store;
pub mod translation;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, StoreError, TranslationError};
pub use language_utils::{get_language_name, validate_language_code};
pub use snbt::{SnbtDocument, apply_translations, extract_descriptions};
pub use store::{TranslationRecord, TranslationStore};
pub use translation::{TranslationDriver, TranslationSummary};
