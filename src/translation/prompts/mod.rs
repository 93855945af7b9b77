/*!
 * Prompt text for quest-book translation.
 *
 * The system instruction is configuration content: the default can be
 * replaced entirely from the config file. Placeholders are filled in once
 * per run.
 */

pub mod templates;

// Re-export main types
pub use templates::PromptTemplate;
