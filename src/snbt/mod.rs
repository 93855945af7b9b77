/*!
 * SNBT quest-book document handling.
 *
 * Quest books keep their player-facing text in description lists of the form
 * `description: ["line one", "line two"]`. This module only understands those
 * lists; the rest of the document is carried through untouched.
 *
 * - `document`: Loading an input document from disk
 * - `extractor`: Pulling translatable strings out of description lists
 * - `substitution`: Writing translations back into description lists
 */

pub mod document;
pub mod extractor;
pub mod substitution;

pub use document::SnbtDocument;
pub use extractor::extract_descriptions;
pub use substitution::{apply_translations, SubstitutionOutcome};
