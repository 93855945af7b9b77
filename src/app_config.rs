use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::providers::anthropic::DEFAULT_ENDPOINT;
use crate::translation::DriverConfig;
use crate::translation::prompts::PromptTemplate;
use crate::validation::ResponseValidationConfig;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation service settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Retry, pacing and checkpoint settings
    #[serde(default)]
    pub driver: DriverConfig,

    /// Response acceptance rules
    #[serde(default)]
    pub validation: ResponseValidationConfig,

    /// System prompt template
    /// Placeholders: {source_language}, {target_language}, {preserved_terms}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Terms the model is told to leave untranslated (mod and item names)
    #[serde(default)]
    pub preserved_terms: Vec<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    // @field: Max tokens per response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    // @field: Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "ja".to_string()
}

fn default_model() -> String {
    "claude-3-5-haiku-20241022".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.0
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_system_prompt() -> String {
    PromptTemplate::QUEST_BOOK_TRANSLATOR.to_string()
}

impl Config {
    /// Load the configuration file, writing a default one if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            return serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path));
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        crate::language_utils::validate_language_code(&self.source_language)
            .context("Invalid source_language")?;
        crate::language_utils::validate_language_code(&self.target_language)
            .context("Invalid target_language")?;

        Url::parse(&self.provider.endpoint)
            .with_context(|| format!("Invalid provider endpoint: {}", self.provider.endpoint))?;

        if self.provider.model.trim().is_empty() {
            return Err(anyhow!("A model name is required"));
        }
        if self.provider.api_key_env.trim().is_empty() {
            return Err(anyhow!("api_key_env must name an environment variable"));
        }
        if self.driver.batch_size == 0 {
            return Err(anyhow!("driver.batch_size must be at least 1"));
        }
        if self.driver.save_every == 0 {
            return Err(anyhow!("driver.save_every must be at least 1"));
        }

        Ok(())
    }

    /// The system prompt with languages and preserved terms filled in
    pub fn rendered_system_prompt(&self) -> Result<String> {
        let source_name = crate::language_utils::get_language_name(&self.source_language)?;
        let target_name = crate::language_utils::get_language_name(&self.target_language)?;

        Ok(PromptTemplate::new(&self.system_prompt).render(
            &source_name,
            &target_name,
            &self.preserved_terms,
        ))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            provider: ProviderConfig::default(),
            driver: DriverConfig::default(),
            validation: ResponseValidationConfig::default(),
            system_prompt: default_system_prompt(),
            preserved_terms: Vec::new(),
            log_level: LogLevel::default(),
        }
    }
}
