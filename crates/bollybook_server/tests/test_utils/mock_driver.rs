//! Mock LLM driver for testing.

use async_trait::async_trait;
use bollybook_core::{GenerateRequest, GenerateResponse, Output};
use bollybook_error::{BollybookError, BollybookResult, GenerationError, GenerationErrorKind};
use bollybook_interface::BollybookDriver;
use std::sync::Mutex;
use std::time::Duration;

/// Answers with a few lines of page-formatted text mentioning the session key
/// and records every request.
pub struct MockDriver {
    fail_on: Option<&'static str>,
    slow_on: Option<(&'static str, Duration)>,
    requests: Mutex<Vec<GenerateRequest>>,
}

/// The text the mock returns for `session_key`.
#[allow(dead_code)]
pub fn reply_for(session_key: &str) -> String {
    format!(
        "Page 1\n━━━━━━\n\ntext for {}\nRaju: \"Latency < 10ms & uptime > 99%\"",
        session_key
    )
}

#[allow(dead_code)]
impl MockDriver {
    /// Answer every request.
    pub fn echo() -> Self {
        Self {
            fail_on: None,
            slow_on: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Echo, except the request with `session_key` fails with a provider error.
    pub fn failing_on(session_key: &'static str) -> Self {
        Self {
            fail_on: Some(session_key),
            slow_on: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep for `delay` before answering `session_key`.
    pub fn slow_on(mut self, session_key: &'static str, delay: Duration) -> Self {
        self.slow_on = Some((session_key, delay));
        self
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The user prompt sent under `session_key`, if any.
    pub fn prompt_for(&self, session_key: &str) -> Option<String> {
        self.requests()
            .into_iter()
            .find(|r| r.session_key() == session_key)
            .and_then(|r| r.messages().last().map(|m| m.content.clone()))
    }
}

#[async_trait]
impl BollybookDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> BollybookResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        if let Some((key, delay)) = self.slow_on {
            if key == req.session_key().as_str() {
                tokio::time::sleep(delay).await;
            }
        }
        if self.fail_on == Some(req.session_key().as_str()) {
            return Err(BollybookError::from(GenerationError::new(
                GenerationErrorKind::Provider {
                    status: 503,
                    message: "model overloaded".to_string(),
                },
            )));
        }
        Ok(GenerateResponse {
            outputs: vec![Output::Text(reply_for(req.session_key()))],
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
