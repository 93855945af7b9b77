/*!
 * Translation driver.
 *
 * Walks the untranslated records of a store in order, asks the translator for
 * each one, validates the answer and commits it. Records are processed one at
 * a time in fixed-size batches with pauses between calls and between batches.
 * The store is saved after every `save_every` accepted translations, after
 * each batch, at the end of the run and before any fatal error is returned,
 * so at most the record in flight is lost on a crash.
 */

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::retry::RetryPolicy;
use crate::errors::TranslationError;
use crate::providers::Translator;
use crate::store::TranslationStore;
use crate::validation::ResponseValidator;

/// Retry, pacing and checkpoint settings for a translation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Retries per record for transient errors
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff (milliseconds)
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// First wait after a rate-limit error (milliseconds)
    #[serde(default = "default_rate_limit_initial_wait_ms")]
    pub rate_limit_initial_wait_ms: u64,

    /// Added to the wait for every further rate-limit error in the run (milliseconds)
    #[serde(default = "default_rate_limit_increment_ms")]
    pub rate_limit_increment_ms: u64,

    /// Records per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between two calls in a batch (milliseconds)
    #[serde(default = "default_inter_request_delay_ms")]
    pub inter_request_delay_ms: u64,

    /// Pause between two batches (milliseconds)
    #[serde(default = "default_inter_batch_delay_ms")]
    pub inter_batch_delay_ms: u64,

    /// Save the store after this many accepted translations
    #[serde(default = "default_save_every")]
    pub save_every: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            rate_limit_initial_wait_ms: default_rate_limit_initial_wait_ms(),
            rate_limit_increment_ms: default_rate_limit_increment_ms(),
            batch_size: default_batch_size(),
            inter_request_delay_ms: default_inter_request_delay_ms(),
            inter_batch_delay_ms: default_inter_batch_delay_ms(),
            save_every: default_save_every(),
        }
    }
}

impl DriverConfig {
    /// Build the retry policy described by this configuration
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_millis(self.base_delay_ms),
            Duration::from_millis(self.rate_limit_initial_wait_ms),
            Duration::from_millis(self.rate_limit_increment_ms),
        )
    }
}

fn default_max_retries() -> u32 {
    5
}

fn default_base_delay_ms() -> u64 {
    2000
}

fn default_rate_limit_initial_wait_ms() -> u64 {
    30_000
}

fn default_rate_limit_increment_ms() -> u64 {
    30_000
}

fn default_batch_size() -> usize {
    10
}

fn default_inter_request_delay_ms() -> u64 {
    1000
}

fn default_inter_batch_delay_ms() -> u64 {
    5000
}

fn default_save_every() -> usize {
    5
}

/// Counters for one translation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationSummary {
    /// Untranslated records found at the start of the run
    pub pending: usize,
    /// Records for which a response was received
    pub attempted: usize,
    /// Responses committed to the store
    pub accepted: usize,
    /// Responses rejected by validation
    pub rejected: usize,
    /// Retries spent on transient errors
    pub retries: u32,
}

/// Fills in the empty targets of a translation store
#[derive(Debug)]
pub struct TranslationDriver<T: Translator> {
    translator: T,
    config: DriverConfig,
    validator: ResponseValidator,
    retry: RetryPolicy,
}

impl<T: Translator> TranslationDriver<T> {
    /// Create a driver
    pub fn new(translator: T, config: DriverConfig, validator: ResponseValidator) -> Self {
        Self {
            retry: config.retry_policy(),
            translator,
            config,
            validator,
        }
    }

    /// The underlying translator
    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Translate every untranslated record of `store`, saving to `store_path`.
    ///
    /// `progress_callback` is called with `(done, pending)` after each record.
    /// A non-retryable error, or a transient one that outlasts the retry
    /// budget, aborts the run after the store has been saved.
    pub async fn translate_all(
        &mut self,
        store: &mut TranslationStore,
        store_path: &Path,
        progress_callback: impl Fn(usize, usize),
    ) -> Result<TranslationSummary, TranslationError> {
        let pending = store.untranslated_indices();
        let mut summary = TranslationSummary {
            pending: pending.len(),
            ..Default::default()
        };

        if pending.is_empty() {
            info!("All texts are already translated");
            return Ok(summary);
        }

        let batch_size = self.config.batch_size.max(1);
        let save_every = self.config.save_every.max(1);
        let batch_count = pending.len().div_ceil(batch_size);
        let mut accepted_since_save = 0;

        for (batch_index, batch) in pending.chunks(batch_size).enumerate() {
            if batch_index > 0 {
                pause(self.config.inter_batch_delay_ms).await;
            }
            debug!("Processing batch {} of {}", batch_index + 1, batch_count);

            for (position, &record_index) in batch.iter().enumerate() {
                if position > 0 {
                    pause(self.config.inter_request_delay_ms).await;
                }

                let source = match store.get(record_index) {
                    Some(record) => record.source.clone(),
                    None => continue,
                };
                info!("Translating: {}", source);

                let translator = &self.translator;
                let text: &str = &source;
                let result = self.retry.run(text, move || translator.translate(text)).await;

                let response = match result {
                    Ok(response) => response,
                    Err(e) => {
                        error!("Error while translating {:?}: {}", source, e);
                        flush(store, store_path);
                        return Err(e);
                    }
                };
                summary.retries += response.retries;
                summary.attempted += 1;

                match self.validator.validate(&response.value) {
                    Ok(accepted) => {
                        debug!("Accepted: {}", accepted);
                        store.set_target(record_index, accepted);
                        summary.accepted += 1;
                        accepted_since_save += 1;

                        if accepted_since_save >= save_every {
                            store.save(store_path)?;
                            accepted_since_save = 0;
                            info!("Progress: {}/{} translated", summary.accepted, summary.pending);
                        }
                    }
                    Err(rejection) => {
                        warn!(
                            "Rejected translation of {:?} ({}); raw response: {:?}",
                            source, rejection, response.value
                        );
                        store.set_target(record_index, String::new());
                        summary.rejected += 1;
                    }
                }

                progress_callback(summary.attempted, summary.pending);
            }

            store.save(store_path)?;
        }

        info!(
            "Translation finished: {}/{} translated, {} rejected",
            summary.accepted, summary.pending, summary.rejected
        );
        Ok(summary)
    }
}

async fn pause(delay_ms: u64) {
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

/// Best-effort save before a fatal error is returned
fn flush(store: &TranslationStore, store_path: &Path) {
    match store.save(store_path) {
        Ok(()) => info!("Saved progress to {:?}", store_path),
        Err(e) => error!("Failed to save progress to {:?}: {}", store_path, e),
    }
}
