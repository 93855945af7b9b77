/*!
 * Translation store data model.
 *
 * The store is an ordered list of `{source, target}` records keyed by source.
 * Records are appended in first-seen order and never removed, so a store keeps
 * every string it has ever seen even after it disappears from the documents.
 */

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single source string and its translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Original text, unique within a store
    pub source: String,
    /// Translated text; empty means not translated yet
    #[serde(default)]
    pub target: String,
}

impl TranslationRecord {
    /// Create a new record
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Create a record that still needs a translation
    pub fn untranslated(source: impl Into<String>) -> Self {
        Self::new(source, String::new())
    }

    /// Whether a translation has been committed
    pub fn is_translated(&self) -> bool {
        !self.target.is_empty()
    }
}

/// Ordered collection of translation records with unique sources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationStore {
    records: Vec<TranslationRecord>,
    sources: HashSet<String>,
}

impl TranslationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records, dropping empty sources and later duplicates
    pub fn from_records(records: Vec<TranslationRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Append a record unless its source is empty or already present.
    ///
    /// Returns whether the record was added.
    pub fn insert(&mut self, record: TranslationRecord) -> bool {
        if record.source.is_empty() || self.sources.contains(&record.source) {
            return false;
        }
        self.sources.insert(record.source.clone());
        self.records.push(record);
        true
    }

    /// Merge freshly extracted strings into the store.
    ///
    /// Unseen sources are appended with an empty target in the order given;
    /// existing records are never modified or reordered. Returns the number
    /// of untranslated records after the merge.
    pub fn merge<I, S>(&mut self, extracted: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for source in extracted {
            self.insert(TranslationRecord::untranslated(source));
        }
        self.untranslated_count()
    }

    /// All records in insertion order
    pub fn records(&self) -> &[TranslationRecord] {
        &self.records
    }

    /// Record at `index`
    pub fn get(&self, index: usize) -> Option<&TranslationRecord> {
        self.records.get(index)
    }

    /// Look a record up by source text
    pub fn find(&self, source: &str) -> Option<&TranslationRecord> {
        if !self.sources.contains(source) {
            return None;
        }
        self.records.iter().find(|record| record.source == source)
    }

    /// Whether a record with this source exists
    pub fn contains(&self, source: &str) -> bool {
        self.sources.contains(source)
    }

    /// Set the target of the record at `index`
    pub fn set_target(&mut self, index: usize, target: impl Into<String>) {
        if let Some(record) = self.records.get_mut(index) {
            record.target = target.into();
        }
    }

    /// Indices of records without a translation, in store order
    pub fn untranslated_indices(&self) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| !record.is_translated())
            .map(|(index, _)| index)
            .collect()
    }

    /// Number of records with a translation
    pub fn translated_count(&self) -> usize {
        self.records.iter().filter(|record| record.is_translated()).count()
    }

    /// Number of records without a translation
    pub fn untranslated_count(&self) -> usize {
        self.records.len() - self.translated_count()
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
