use super::{AnthropicContentBlock, AnthropicMessage, AnthropicRequest, AnthropicResponse};
use async_trait::async_trait;
use fabulist_config::GeneratorConfig;
use fabulist_core::{Prompt, RawCandidate};
use fabulist_error::{FabulistResult, GeneratorError, GeneratorErrorKind};
use fabulist_interface::StoryGenerator;
use reqwest::Client;
use tracing::{debug, error, instrument, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Anthropic messages API client.
///
/// Sends the prompt's system text as the `system` parameter and its user
/// text as the only message. Connection failures, timeouts, and throttling
/// or server statuses come back as retryable generator errors; the repair
/// loop decides whether to try again.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    config: GeneratorConfig,
}

impl AnthropicClient {
    /// Creates a new Anthropic client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    /// * `config` - Model, token ceiling, temperature, and endpoint
    pub fn new(api_key: impl Into<String>, config: GeneratorConfig) -> Self {
        debug!(model = %config.model, "Creating new Anthropic client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            config,
        }
    }

    /// Creates a client with the key from `ANTHROPIC_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError` with `MissingApiKey` when the variable is
    /// unset or empty.
    pub fn from_env(config: GeneratorConfig) -> FabulistResult<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GeneratorError::new(GeneratorErrorKind::MissingApiKey))?;
        Ok(Self::new(api_key, config))
    }

    /// Build the request body for a prompt.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError` with `Rejected` if the request cannot be built.
    pub fn request_for(&self, prompt: &Prompt) -> FabulistResult<AnthropicRequest> {
        let message = AnthropicMessage::builder()
            .role("user")
            .content(vec![AnthropicContentBlock::text(prompt.user().as_str())])
            .build()
            .map_err(|e| GeneratorError::new(GeneratorErrorKind::Rejected(e.to_string())))?;

        let request = AnthropicRequest::builder()
            .model(self.config.model.as_str())
            .max_tokens(self.config.max_tokens)
            .system(Some(prompt.system().clone()))
            .messages(vec![message])
            .temperature(self.config.temperature)
            .build()
            .map_err(|e| GeneratorError::new(GeneratorErrorKind::Rejected(e.to_string())))?;
        Ok(request)
    }

    /// Sends a request to the messages endpoint.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError`: `Timeout` or `Unavailable` when the call
    /// does not complete, `Http` for an error status, and `Parse` when the
    /// response body is not a messages response.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn send(&self, request: &AnthropicRequest) -> FabulistResult<AnthropicResponse> {
        debug!("Sending request to Anthropic API");

        let response = self
            .client
            .post(&self.config.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = ?e, "Failed to send request to Anthropic API");
                GeneratorError::new(transport_kind(&e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Anthropic API returned error");
            return Err(GeneratorError::new(GeneratorErrorKind::Http {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let parsed: AnthropicResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Anthropic response");
            GeneratorError::new(GeneratorErrorKind::Parse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(
            response_id = %parsed.id(),
            input_tokens = parsed.usage().input_tokens(),
            output_tokens = parsed.usage().output_tokens(),
            "Received response from Anthropic"
        );
        Ok(parsed)
    }
}

fn transport_kind(e: &reqwest::Error) -> GeneratorErrorKind {
    if e.is_timeout() {
        GeneratorErrorKind::Timeout { elapsed_ms: 0 }
    } else {
        GeneratorErrorKind::Unavailable(format!("Request failed: {}", e))
    }
}

/// Text of a response, or why it carries none.
fn candidate_text(response: &AnthropicResponse) -> FabulistResult<String> {
    if response.stop_reason().as_deref() == Some("refusal") {
        return Err(GeneratorError::new(GeneratorErrorKind::Rejected(
            "model declined the request".to_string(),
        ))
        .into());
    }
    let text = response.text();
    if text.trim().is_empty() {
        return Err(GeneratorError::new(GeneratorErrorKind::Unavailable(
            "response contained no text".to_string(),
        ))
        .into());
    }
    if response.stop_reason().as_deref() == Some("max_tokens") {
        warn!(
            max_tokens = response.usage().output_tokens(),
            "Response hit the token ceiling and is likely truncated"
        );
    }
    Ok(text)
}

#[async_trait]
impl StoryGenerator for AnthropicClient {
    #[instrument(skip_all, fields(attempt = prompt.attempt(), model = %self.config.model))]
    async fn generate(&self, prompt: &Prompt) -> FabulistResult<RawCandidate> {
        let request = self.request_for(prompt)?;
        let response = self.send(&request).await?;
        Ok(RawCandidate::new(candidate_text(&response)?))
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
