use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::{FileManager, SNBT_EXTENSION};
use crate::providers::Translator;
use crate::providers::anthropic::{Anthropic, AnthropicTranslator};
use crate::snbt::SnbtDocument;
use crate::store::TranslationStore;
use crate::translation::{TranslationDriver, TranslationSummary};
use crate::validation::ResponseValidator;

// @module: Application controller for quest-book translation

/// Counters reported by an extract run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// Documents read
    pub documents: usize,
    /// Distinct strings found across all documents
    pub extracted: usize,
    /// Records in the store after merging
    pub total: usize,
    /// Records still waiting for a translation
    pub untranslated: usize,
}

/// Counters reported by an apply run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Documents read
    pub documents: usize,
    /// Documents written with at least one substitution
    pub written: usize,
    /// Distinct records substituted, summed over documents
    pub substitutions: usize,
}

/// Main application controller for quest-book translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Extract the description strings of `input` (a file or a directory of
    /// `.snbt` files) and merge them into the store at `store_path`
    pub fn run_extract(&self, input: &Path, store_path: &Path) -> Result<ExtractReport> {
        let documents = Self::collect_documents(input)?;

        let mut store = TranslationStore::load_or_create(store_path)?;
        let mut report = ExtractReport {
            documents: documents.len(),
            ..Default::default()
        };

        for path in &documents {
            let document = SnbtDocument::load(path)?;
            let texts = document.extract();
            info!("Extracted {} strings from {}", texts.len(), document.display_name());
            report.extracted += texts.len();
            store.merge(texts);
        }

        store
            .save(store_path)
            .with_context(|| format!("Failed to save translation store: {:?}", store_path))?;

        report.total = store.len();
        report.untranslated = store.untranslated_count();
        info!(
            "Translation store {:?}: {} records, {} untranslated",
            store_path, report.total, report.untranslated
        );

        Ok(report)
    }

    /// Write the translations in the store back into `input`.
    ///
    /// For a single file `output` is the output file; for a directory it is
    /// the output directory and relative paths are kept. Documents without any
    /// substitution are not written. With `backup`, each input is copied to
    /// `<input>.bak` once, and an in-place apply reads from that copy.
    pub fn run_apply(&self, input: &Path, store_path: &Path, output: &Path, backup: bool) -> Result<ApplyReport> {
        let documents = Self::collect_documents(input)?;

        let store = TranslationStore::load_or_create(store_path)?;
        let mut report = ApplyReport {
            documents: documents.len(),
            ..Default::default()
        };

        if store.translated_count() == 0 {
            info!("No translations available in {:?}, nothing to apply", store_path);
            return Ok(report);
        }

        for path in &documents {
            let output_path = if FileManager::dir_exists(input) {
                FileManager::mirror_path(path, input, output)?
            } else {
                output.to_path_buf()
            };

            // In place with a backup, always start again from the untouched copy
            // so corrected translations replace earlier ones
            let mut source_path = path.clone();
            if backup {
                if FileManager::create_backup(path)? {
                    info!("Backup written: {:?}", FileManager::backup_path(path));
                }
                if FileManager::same_file(path, &output_path) {
                    source_path = FileManager::backup_path(path);
                }
            }

            let document = SnbtDocument::new(path, FileManager::read_to_string(&source_path)?);
            let outcome = document.apply(&store);
            if !outcome.changed() {
                info!("No substitutions for {}, output not written", document.display_name());
                continue;
            }

            FileManager::write_to_file(&output_path, &outcome.content)?;
            report.written += 1;
            report.substitutions += outcome.substitution_count;
            info!(
                "Applied {} translations to {} -> {:?}",
                outcome.substitution_count,
                document.display_name(),
                output_path
            );
        }

        info!(
            "Apply complete: {} of {} documents written, {} substitutions",
            report.written, report.documents, report.substitutions
        );
        Ok(report)
    }

    /// Translate every untranslated record of the store with the configured
    /// Anthropic model
    pub async fn run_translate(&self, store_path: &Path) -> Result<TranslationSummary> {
        let provider = &self.config.provider;

        // Fail on a missing credential before touching the network
        let client = Anthropic::from_env(&provider.api_key_env, &provider.endpoint, provider.timeout_secs)?;
        let translator = AnthropicTranslator::new(
            client,
            &provider.model,
            self.config.rendered_system_prompt()?,
            provider.max_tokens,
            provider.temperature,
        );

        info!("Translating with Anthropic - {}", provider.model);
        self.translate_with(translator, store_path).await
    }

    /// Translate every untranslated record of the store with `translator`
    pub async fn translate_with<T: Translator>(&self, translator: T, store_path: &Path) -> Result<TranslationSummary> {
        let mut store = TranslationStore::load_or_create(store_path)?;
        if store.untranslated_count() == 0 {
            info!("Nothing to translate in {:?}", store_path);
            return Ok(TranslationSummary::default());
        }

        let validator = ResponseValidator::new(self.config.validation.clone());
        let mut driver = TranslationDriver::new(translator, self.config.driver.clone(), validator);

        let progress_bar = ProgressBar::new(store.untranslated_count() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} texts ({percent}%) {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let pb = progress_bar.clone();
        let result = driver
            .translate_all(&mut store, store_path, move |done, pending| {
                pb.set_length(pending as u64);
                pb.set_position(done as u64);
            })
            .await;
        progress_bar.finish_and_clear();

        let summary = result?;
        if summary.rejected > 0 {
            warn!(
                "{} responses were rejected and left untranslated; run translate again to retry them",
                summary.rejected
            );
        }
        info!(
            "Translation complete: {} accepted, {} rejected, {} retries",
            summary.accepted, summary.rejected, summary.retries
        );

        Ok(summary)
    }

    /// The documents named by `input`: the file itself, or every `.snbt`
    /// file below a directory
    fn collect_documents(input: &Path) -> Result<Vec<PathBuf>> {
        if FileManager::file_exists(input) {
            return Ok(vec![input.to_path_buf()]);
        }

        if FileManager::dir_exists(input) {
            let files = FileManager::find_files(input, SNBT_EXTENSION)?;
            if files.is_empty() {
                return Err(anyhow!("No .snbt files found in directory: {:?}", input));
            }
            return Ok(files);
        }

        Err(anyhow!("Input does not exist: {:?}", input))
    }
}
