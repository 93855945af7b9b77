/*!
 * Error types for the snbt-trans application.
 *
 * This module contains custom error types for the different stages of the
 * pipeline, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when calling the external translation service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The service asked us to slow down (HTTP 429)
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Error message from the API
        message: String,
        /// Value of the `retry-after` header, if the service sent one
        retry_after_secs: Option<u64>,
    },

    /// The service is temporarily overloaded
    #[error("Service overloaded: {0}")]
    Overloaded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The credential environment variable is not set
    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),
}

impl ProviderError {
    /// Whether a retry with backoff may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded { .. } | Self::Overloaded(_) | Self::ConnectionError(_)
        )
    }

    /// Whether this is the stricter rate-limit class
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }
}

/// Errors that can occur when reading or writing the translation store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file does not exist
    #[error("Translation store not found: {0:?}")]
    NotFound(PathBuf),

    /// The store file exists but is not a valid record sequence
    #[error("Malformed translation store {path:?}: {reason}")]
    Malformed {
        /// Path of the store file
        path: PathBuf,
        /// Parser diagnostic
        reason: String,
    },

    /// Reading or writing the file failed
    #[error("I/O error on translation store {path:?}: {source}")]
    Io {
        /// Path of the store file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The store could not be serialized
    #[error("Failed to serialize translation store: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors that can occur during a translation run
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Non-retryable error from the provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Transient errors persisted beyond the retry budget
    #[error("Giving up on {source_text:?} after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Source text of the record being translated
        source_text: String,
        /// Number of calls made
        attempts: u32,
        /// The final transient error
        last_error: ProviderError,
    },

    /// Progress could not be persisted
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the translation store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
