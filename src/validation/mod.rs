/*!
 * Validation of translation service responses.
 *
 * - `response`: Rejects commentary, refusals and malformed responses
 *   before they reach the translation store
 */

pub mod response;

// Re-export main types
pub use response::{Rejection, ResponseValidationConfig, ResponseValidator};
