use async_trait::async_trait;
use meetbrief_common::{AppConfig, MeetbriefError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::llm_trait::LlmClient;
use crate::types::{ApiErrorResponse, MessagesRequest, MessagesResponse};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    max_retries: u32,
    retry_base_delay: Duration,
    client: Client,
}

/// Outcome of a failed single attempt
enum AttemptError {
    /// Worth another attempt (transport failure, 429, 5xx)
    Retryable(MeetbriefError),
    /// Retrying cannot help (bad request, auth, unparseable body)
    Fatal(MeetbriefError),
}

impl AnthropicClient {
    /// Create new Anthropic client
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MeetbriefError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!("Anthropic client initialized: {} ({})", base_url, model);
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            model,
            max_tokens: 1024,
            max_retries: 3,
            retry_base_delay: Duration::from_secs(1),
            client,
        })
    }

    /// Build a client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.require_model_credentials()?;
        Ok(Self::new(
            &config.anthropic_base_url,
            &config.anthropic_api_key,
            &config.llm_model,
            Duration::from_secs(config.llm_timeout_secs),
        )?
        .with_max_tokens(config.llm_max_tokens)
        .with_max_retries(config.llm_max_retries))
    }

    /// Set the generation limit per call
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the number of attempts per call (at least 1)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the first backoff delay; later delays double
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Generate text with retry logic
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/v1/messages", self.base_url);
        let request = MessagesRequest::user(&self.model, self.max_tokens, prompt);

        debug!(
            "Sending messages request - Model: {}, Prompt length: {}",
            request.model,
            prompt.len()
        );

        let mut attempt = 1;
        loop {
            match self.try_generate(&url, &request).await {
                Ok(response) => {
                    debug!("Received response - Length: {}", response.len());
                    return Ok(response);
                }
                Err(AttemptError::Fatal(e)) => return Err(e),
                Err(AttemptError::Retryable(e)) => {
                    if attempt >= self.max_retries {
                        return Err(e);
                    }
                    let delay = self.retry_base_delay * 2u32.pow(attempt - 1);
                    warn!(
                        "Model request failed (attempt {}/{}): {}. Retrying in {:?}...",
                        attempt, self.max_retries, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Single attempt to generate text
    async fn try_generate(
        &self,
        url: &str,
        request: &MessagesRequest,
    ) -> std::result::Result<String, AttemptError> {
        let response = self
            .client
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                AttemptError::Retryable(MeetbriefError::model(format!(
                    "Failed to send request: {}",
                    e
                )))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| format!("{}: {}", e.error.kind, e.error.message))
                .unwrap_or(body);
            let err = MeetbriefError::model(format!("Anthropic API error ({}): {}", status, detail));
            return Err(if is_retryable(status) {
                AttemptError::Retryable(err)
            } else {
                AttemptError::Fatal(err)
            });
        }

        let result: MessagesResponse = response.json().await.map_err(|e| {
            AttemptError::Fatal(MeetbriefError::model(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        match result.first_text() {
            Some(text) => Ok(text.trim().to_string()),
            None => Err(AttemptError::Fatal(MeetbriefError::model(
                "Response contained no text block",
            ))),
        }
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        AnthropicClient::generate(self, prompt).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
