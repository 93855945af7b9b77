/*!
 * Acceptance rules for model responses.
 *
 * Language models sometimes answer with commentary instead of a translation
 * ("Understood", "Here is the translation", apologies, refusals). Such
 * responses must never be written to the store.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phrases whose presence marks a response as commentary rather than a translation
pub fn default_disallowed_phrases() -> Vec<String> {
    [
        "Human:",
        "申し訳ありませんが",
        "以下のように翻訳",
        "翻訳は以下の通り",
        "翻訳結果は以下",
        "はい、",
        "わかりました",
        "理解しました",
        "私には、著作権で保護された",
        "著作権保護の対象",
        "著作権の関係",
        "I'm sorry",
        "I apologize",
        "translated as follows",
        "Here is the translation",
        "Understood",
    ]
    .iter()
    .map(|phrase| phrase.to_string())
    .collect()
}

/// Validation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseValidationConfig {
    /// Substrings that cause a response to be rejected
    #[serde(default = "default_disallowed_phrases")]
    pub disallowed_phrases: Vec<String>,

    /// Reject responses that start with a line break
    #[serde(default = "default_true")]
    pub reject_leading_line_break: bool,
}

impl Default for ResponseValidationConfig {
    fn default() -> Self {
        Self {
            disallowed_phrases: default_disallowed_phrases(),
            reject_leading_line_break: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Why a response was not accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The response was empty or whitespace only
    Empty,
    /// The response begins with a line break
    LeadingLineBreak,
    /// The response contains a disallowed phrase
    DisallowedPhrase(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty response"),
            Self::LeadingLineBreak => write!(f, "response starts with a line break"),
            Self::DisallowedPhrase(phrase) => write!(f, "response contains {:?}", phrase),
        }
    }
}

/// Checks model responses before they are committed
#[derive(Debug, Clone, Default)]
pub struct ResponseValidator {
    config: ResponseValidationConfig,
}

impl ResponseValidator {
    /// Create a validator with the given settings
    pub fn new(config: ResponseValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a raw response.
    ///
    /// Returns the text to commit (trailing whitespace removed) or the reason
    /// for rejection.
    pub fn validate<'a>(&self, response: &'a str) -> Result<&'a str, Rejection> {
        if self.config.reject_leading_line_break && response.starts_with(['\n', '\r']) {
            return Err(Rejection::LeadingLineBreak);
        }

        if let Some(phrase) = self
            .config
            .disallowed_phrases
            .iter()
            .find(|phrase| !phrase.is_empty() && response.contains(phrase.as_str()))
        {
            return Err(Rejection::DisallowedPhrase(phrase.clone()));
        }

        let accepted = response.trim_end();
        if accepted.trim_start().is_empty() {
            return Err(Rejection::Empty);
        }

        Ok(accepted)
    }
}
