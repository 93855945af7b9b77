//! Language utilities for the configured source and target languages
//!
//! Codes may be given as ISO 639-1 (`en`), ISO 639-2/T (`eng`) or the
//! bibliographic ISO 639-2/B variants (`ger`, `fre`, ...). Names are used to
//! fill the translator prompt.

use anyhow::{Result, anyhow};
use isolang::Language;

/// ISO 639-2/B codes and their ISO 639-2/T equivalents
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("dut", "nld"),
    ("fre", "fra"),
    ("geo", "kat"),
    ("ger", "deu"),
    ("gre", "ell"),
    ("ice", "isl"),
    ("mac", "mkd"),
    ("may", "msa"),
    ("per", "fas"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Resolve a code to its `isolang` language
fn resolve(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();

    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => {
            let terminology = BIBLIOGRAPHIC_CODES
                .iter()
                .find(|(bibliographic, _)| *bibliographic == normalized)
                .map_or(normalized.as_str(), |(_, terminology)| *terminology);
            Language::from_639_3(terminology)
        }
        _ => None,
    }
}

/// Check that a language code is a known ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<()> {
    resolve(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    resolve(code)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}
