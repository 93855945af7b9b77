/*!
 * Persistent translation state.
 *
 * - `models`: The record and store types, including the additive merge of
 *   newly extracted strings
 * - `persistence`: Loading and saving the store file, with support for the
 *   legacy shapes written by older tools
 */

pub mod models;
pub mod persistence;

pub use models::{TranslationRecord, TranslationStore};
