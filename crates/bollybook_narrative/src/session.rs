//! One persona-conditioned LLM call per prompt.

use bollybook_core::{GenerateRequest, Message};
use bollybook_error::{BollybookError, BollybookErrorKind, GenerationError, GenerationErrorKind};
use bollybook_interface::BollybookDriver;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// Sends prompts to the LLM, each in a fresh context keyed by a session key.
///
/// Requests carry exactly two messages: the persona instruction as the
/// system message and the composed prompt as the user message. Failures are
/// returned as-is; the session never retries.
#[derive(Clone)]
pub struct GenerationSession {
    driver: Arc<dyn BollybookDriver>,
    model: Option<String>,
    request_timeout: Option<Duration>,
}

impl std::fmt::Debug for GenerationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationSession")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.model_name())
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl GenerationSession {
    /// Create a session over the given driver.
    pub fn new(driver: Arc<dyn BollybookDriver>) -> Self {
        Self {
            driver,
            model: None,
            request_timeout: None,
        }
    }

    /// Request a specific model instead of the driver's default.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Abandon any single call that takes longer than `timeout`.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Model that requests go to.
    pub fn model_name(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.driver.model_name())
    }

    /// Send one prompt and return the generated text.
    ///
    /// # Errors
    ///
    /// Transport and provider failures from the driver, a
    /// [`GenerationErrorKind::Timeout`] if the call exceeds the request
    /// timeout, and [`GenerationErrorKind::EmptyResponse`] when the model
    /// returns no text.
    #[instrument(skip(self, persona, prompt), fields(prompt_chars = prompt.len()))]
    pub async fn send(
        &self,
        persona: &str,
        session_key: &str,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let mut builder = GenerateRequest::builder();
        builder
            .session_key(session_key)
            .messages(vec![Message::system(persona), Message::user(prompt)]);
        if let Some(model) = &self.model {
            builder.model(model.clone());
        }
        let request = builder
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Builder(e.to_string())))?;

        let call = self.driver.generate(&request);
        let result = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                tracing::error!(session_key, seconds = limit.as_secs(), "LLM call timed out");
                GenerationError::new(GenerationErrorKind::Timeout {
                    scope: session_key.to_string(),
                    seconds: limit.as_secs(),
                })
            })?,
            None => call.await,
        };

        let response = result.map_err(|e| {
            tracing::error!(session_key, error = %e, "LLM call failed");
            into_generation_error(e)
        })?;

        let text = response.text();
        if text.trim().is_empty() {
            tracing::error!(session_key, "LLM returned no text");
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse(
                session_key.to_string(),
            )));
        }

        tracing::debug!(session_key, chars = text.chars().count(), "Generated text");
        Ok(text)
    }
}

fn into_generation_error(err: BollybookError) -> GenerationError {
    match err.kind() {
        BollybookErrorKind::Generation(e) => e.clone(),
        _ => GenerationError::new(GenerationErrorKind::Transport(err.detail())),
    }
}
