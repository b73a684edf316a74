use super::convert;
use super::dto::{ChatCompletionRequest, ChatCompletionResponse};
use bollybook_core::{GenerateRequest, GenerateResponse};
use bollybook_error::{BollybookResult, GenerationError, GenerationErrorKind};
use bollybook_interface::BollybookDriver;
use serde::{Deserialize, Serialize};
use tracing::instrument;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";

/// Connection settings for a chat-completions endpoint.
///
/// # Examples
///
/// ```
/// use bollybook_models::OpenAiConfig;
///
/// let config = OpenAiConfig::builder()
///     .api_key("sk-test")
///     .build()
///     .unwrap();
/// assert_eq!(config.model(), "gpt-4o");
/// assert_eq!(config.base_url(), "https://api.openai.com/v1");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct OpenAiConfig {
    /// Endpoint prefix; `/chat/completions` is appended
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Bearer credential, omitted from requests when absent
    #[builder(default, setter(strip_option))]
    api_key: Option<String>,
    /// Model used when a request names none
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    model: String,
}

impl OpenAiConfig {
    /// Creates a new config builder.
    pub fn builder() -> OpenAiConfigBuilder {
        OpenAiConfigBuilder::default()
    }
}

/// Driver for an OpenAI-compatible chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new client.
    #[instrument(skip(config), fields(base_url = %config.base_url, model = %config.model))]
    pub fn new(config: OpenAiConfig) -> Self {
        tracing::debug!("Creating chat-completions client");
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Send a chat completion request.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, GenerationError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        tracing::debug!("Sending chat completion request to {}", url);

        let mut req = self.client.post(&url).json(request);
        if let Some(api_key) = &self.config.api_key {
            req = req.bearer_auth(api_key);
        }

        let response = req.send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            GenerationError::new(GenerationErrorKind::Transport(e.to_string()))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Provider returned error");
            return Err(GenerationError::new(GenerationErrorKind::Provider {
                status: status.as_u16(),
                message: body,
            }));
        }

        let result = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            GenerationError::new(GenerationErrorKind::Parse(e.to_string()))
        })?;

        tracing::debug!("Chat completion successful");
        Ok(result)
    }
}

#[async_trait::async_trait]
impl BollybookDriver for OpenAiClient {
    #[instrument(skip(self, req), fields(session = %req.session_key()))]
    async fn generate(&self, req: &GenerateRequest) -> BollybookResult<GenerateResponse> {
        let chat_request = convert::to_chat_request(req, &self.config.model)?;
        let response = self.chat_completion(&chat_request).await?;
        Ok(convert::from_chat_response(response)?)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
