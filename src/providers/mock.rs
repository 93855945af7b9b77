/*!
 * Mock translator for testing.
 *
 * This module provides a translator that never touches the network:
 * - `MockTranslator::working()` - Always succeeds with a tagged copy of the source
 * - `MockTranslator::with_translations()` - Answers from a fixed table
 * - `MockTranslator::push_reply()` - Queues scripted replies (text or errors)
 *   that are consumed before the default behavior applies
 */

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::Translator;
use crate::errors::ProviderError;

/// A scripted reply for a single call
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with this text
    Text(String),
    /// Fail with a rate-limit error
    RateLimited,
    /// Fail with an overload error
    Overloaded,
    /// Fail with a non-retryable error
    Fatal,
}

impl MockReply {
    fn into_result(self) -> Result<String, ProviderError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::RateLimited => Err(ProviderError::RateLimitExceeded {
                message: "mock rate limit".to_string(),
                retry_after_secs: None,
            }),
            Self::Overloaded => Err(ProviderError::Overloaded("mock overload".to_string())),
            Self::Fatal => Err(ProviderError::AuthenticationError("mock invalid key".to_string())),
        }
    }
}

/// Translator that answers from a script instead of a service
#[derive(Debug, Default)]
pub struct MockTranslator {
    /// Replies consumed in order before falling back to the table
    script: Mutex<VecDeque<MockReply>>,
    /// Fixed answers by source text
    translations: HashMap<String, String>,
    /// Number of calls made
    call_count: Arc<AtomicUsize>,
    /// Sources received, in call order
    requests: Mutex<Vec<String>>,
}

impl MockTranslator {
    /// Create a mock that answers `[translated] <source>` for everything
    pub fn working() -> Self {
        Self::default()
    }

    /// Create a mock that answers from a table of translations
    pub fn with_translations<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            translations: pairs
                .into_iter()
                .map(|(source, target)| (source.into(), target.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Queue a scripted reply for the next unscripted call
    pub fn push_reply(self, reply: MockReply) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(reply);
        }
        self
    }

    /// Queue the same reply `count` times
    pub fn push_replies(mut self, reply: MockReply, count: usize) -> Self {
        for _ in 0..count {
            self = self.push_reply(reply.clone());
        }
        self
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Sources received so far, in call order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, source: &str) -> Result<String, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(source.to_string());
        }

        let scripted = self.script.lock().ok().and_then(|mut script| script.pop_front());
        if let Some(reply) = scripted {
            return reply.into_result();
        }

        Ok(self
            .translations
            .get(source)
            .cloned()
            .unwrap_or_else(|| format!("[translated] {}", source)))
    }
}
