/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;

use snbt_trans::errors::{AppError, ProviderError, StoreError, TranslationError};

#[test]
fn test_providerError_rateLimitExceeded_shouldDisplayCorrectly() {
    let error = ProviderError::RateLimitExceeded {
        message: "Retry after 60s".to_string(),
        retry_after_secs: Some(60),
    };
    let display = format!("{}", error);
    assert!(display.contains("Rate limit exceeded"));
    assert!(display.contains("Retry after 60s"));
}

#[test]
fn test_providerError_missingCredential_shouldNameVariable() {
    let error = ProviderError::MissingCredential("ANTHROPIC_API_KEY".to_string());
    assert!(format!("{}", error).contains("ANTHROPIC_API_KEY"));
}

#[test]
fn test_providerError_isTransient_shouldCoverRetryableClasses() {
    assert!(ProviderError::Overloaded("busy".to_string()).is_transient());
    assert!(ProviderError::ConnectionError("reset".to_string()).is_transient());
    assert!(
        ProviderError::RateLimitExceeded { message: String::new(), retry_after_secs: None }.is_transient()
    );

    assert!(!ProviderError::AuthenticationError("bad".to_string()).is_transient());
    assert!(!ProviderError::MissingCredential("KEY".to_string()).is_transient());
    assert!(!ProviderError::ApiError { status_code: 400, message: String::new() }.is_transient());
    assert!(!ProviderError::ParseError("json".to_string()).is_transient());
}

#[test]
fn test_providerError_isRateLimit_shouldOnlyMatchRateLimit() {
    assert!(ProviderError::RateLimitExceeded { message: String::new(), retry_after_secs: None }.is_rate_limit());
    assert!(!ProviderError::Overloaded("busy".to_string()).is_rate_limit());
}

#[test]
fn test_storeError_malformed_shouldDisplayPathAndReason() {
    let error = StoreError::Malformed {
        path: PathBuf::from("store.json"),
        reason: "expected value at line 1".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("store.json"));
    assert!(display.contains("expected value"));
}

#[test]
fn test_translationError_retriesExhausted_shouldDisplaySourceAndAttempts() {
    let error = TranslationError::RetriesExhausted {
        source_text: "Collect wood.".to_string(),
        attempts: 6,
        last_error: ProviderError::Overloaded("busy".to_string()),
    };
    let display = format!("{}", error);
    assert!(display.contains("Collect wood."));
    assert!(display.contains("6 attempts"));
}

#[test]
fn test_translationError_fromProviderError_shouldWrapCorrectly() {
    let error: TranslationError = ProviderError::AuthenticationError("bad key".to_string()).into();
    assert!(matches!(error, TranslationError::Provider(ProviderError::AuthenticationError(_))));
}

#[test]
fn test_appError_conversions_shouldPickMatchingVariant() {
    let from_io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(from_io, AppError::File(_)));

    let from_anyhow: AppError = anyhow::anyhow!("odd").into();
    assert!(matches!(from_anyhow, AppError::Unknown(ref m) if m == "odd"));

    let from_store: AppError = StoreError::NotFound(PathBuf::from("x.json")).into();
    assert!(matches!(from_store, AppError::Store(_)));
}
