use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;
use crate::store::TranslationStore;

use super::extractor::extract_descriptions;
use super::substitution::{apply_translations, SubstitutionOutcome};

/// A quest-book document loaded from disk
#[derive(Debug, Clone)]
pub struct SnbtDocument {
    /// Where the document was read from
    pub path: PathBuf,
    /// Raw UTF-8 content
    pub content: String,
}

impl SnbtDocument {
    /// Create a document from in-memory content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Read a document, failing if it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(anyhow!("SNBT file not found: {:?}", path));
        }

        let content = FileManager::read_to_string(path)?;
        Ok(Self::new(path, content))
    }

    /// Translatable strings of this document
    pub fn extract(&self) -> Vec<String> {
        extract_descriptions(&self.content)
    }

    /// Apply the translated records of `store` to this document
    pub fn apply(&self, store: &TranslationStore) -> SubstitutionOutcome {
        apply_translations(&self.content, store)
    }

    /// File name used in log messages
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }
}
