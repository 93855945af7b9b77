use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Translator;
use crate::errors::ProviderError;

/// Default public API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";

/// API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic's non-standard "overloaded" status code
const STATUS_OVERLOADED: u16 = 529;

/// Anthropic client for interacting with Anthropic API
#[derive(Debug)]
pub struct Anthropic {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
}

/// Anthropic message request
#[derive(Debug, Serialize)]
pub struct AnthropicRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<AnthropicMessage>,

    /// System prompt to guide the AI
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    /// Maximum number of tokens to generate
    max_tokens: u32,
}

/// Anthropic message format
#[derive(Debug, Serialize, Deserialize)]
pub struct AnthropicMessage {
    /// Role of the message sender (user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    /// Number of input tokens
    pub input_tokens: u32,
    /// Number of output tokens
    pub output_tokens: u32,
}

/// Anthropic response
#[derive(Debug, Deserialize)]
pub struct AnthropicResponse {
    /// The content of the response
    pub content: Vec<AnthropicContent>,
    /// Token usage information
    pub usage: TokenUsage,
}

/// Individual content block in an Anthropic response
#[derive(Debug, Deserialize)]
pub struct AnthropicContent {
    /// The type of content
    #[serde(rename = "type")]
    pub content_type: String,

    /// The actual text content
    #[serde(default)]
    pub text: String,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    error: AnthropicErrorDetail,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

impl AnthropicRequest {
    /// Create a new Anthropic request
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            system: None,
            temperature: None,
            max_tokens,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(AnthropicMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl Anthropic {
    /// Create a new Anthropic client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Create a client whose API key is read from the environment variable `var`
    pub fn from_env(var: &str, endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, ProviderError> {
        let api_key = read_credential(var)?;
        Ok(Self::new(api_key, endpoint, timeout_secs))
    }

    /// Complete a messages request
    pub async fn complete(&self, request: &AnthropicRequest) -> Result<AnthropicResponse, ProviderError> {
        let api_url = if self.endpoint.is_empty() {
            format!("{}/v1/messages", DEFAULT_ENDPOINT)
        } else {
            format!("{}/v1/messages", self.endpoint.trim_end_matches('/'))
        };

        let response = self.client.post(&api_url)
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_secs = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok());
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Anthropic API error ({}): {}", status, error_text);
            return Err(classify_error(status, &error_text, retry_after_secs));
        }

        response.json::<AnthropicResponse>().await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Extract text from Anthropic response
    pub fn extract_text_from_response(response: &AnthropicResponse) -> String {
        response.content.iter()
            .filter(|c| c.content_type == "text")
            .map(|c| c.text.as_str())
            .collect()
    }
}

/// Read a credential from the environment, treating an empty value as missing
pub fn read_credential(var: &str) -> Result<String, ProviderError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ProviderError::MissingCredential(var.to_string())),
    }
}

/// Map an HTTP error response onto the provider error taxonomy
pub fn classify_error(status: StatusCode, body: &str, retry_after_secs: Option<u64>) -> ProviderError {
    let detail = serde_json::from_str::<AnthropicErrorBody>(body).ok().map(|b| b.error);
    let message = detail
        .as_ref()
        .map(|d| d.message.clone())
        .unwrap_or_else(|| body.to_string());
    let error_type = detail.as_ref().map(|d| d.error_type.as_str()).unwrap_or_default();

    match status.as_u16() {
        429 => ProviderError::RateLimitExceeded { message, retry_after_secs },
        401 | 403 => ProviderError::AuthenticationError(message),
        500 | 502 | 503 | 504 | STATUS_OVERLOADED => ProviderError::Overloaded(message),
        _ if error_type == "overloaded_error" => ProviderError::Overloaded(message),
        _ if error_type == "rate_limit_error" => {
            ProviderError::RateLimitExceeded { message, retry_after_secs }
        }
        code => ProviderError::ApiError { status_code: code, message },
    }
}

/// Translator backed by the Anthropic Messages API
#[derive(Debug)]
pub struct AnthropicTranslator {
    client: Anthropic,
    model: String,
    system_prompt: String,
    max_tokens: u32,
    temperature: f32,
}

impl AnthropicTranslator {
    /// Create a translator using `client` with a fixed system prompt
    pub fn new(
        client: Anthropic,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            system_prompt: system_prompt.into(),
            max_tokens,
            temperature,
        }
    }
}

#[async_trait]
impl Translator for AnthropicTranslator {
    async fn translate(&self, source: &str) -> Result<String, ProviderError> {
        let request = AnthropicRequest::new(&self.model, self.max_tokens)
            .system(&self.system_prompt)
            .temperature(self.temperature)
            .add_message("user", source);

        let response = self.client.complete(&request).await?;
        debug!(
            "Anthropic usage: {} input / {} output tokens",
            response.usage.input_tokens, response.usage.output_tokens
        );

        Ok(Anthropic::extract_text_from_response(&response))
    }
}
