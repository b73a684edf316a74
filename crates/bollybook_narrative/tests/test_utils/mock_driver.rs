//! Mock LLM driver for testing.

use async_trait::async_trait;
use bollybook_core::{GenerateRequest, GenerateResponse, Output};
use bollybook_error::{BollybookError, BollybookResult, GenerationError, GenerationErrorKind};
use bollybook_interface::BollybookDriver;
use std::sync::Mutex;
use std::time::Duration;

type Responder = Box<dyn Fn(&GenerateRequest) -> BollybookResult<String> + Send + Sync>;
type Delay = Box<dyn Fn(&GenerateRequest) -> Duration + Send + Sync>;

/// Mock driver that answers from a closure and records every request.
pub struct MockDriver {
    respond: Responder,
    delay: Option<Delay>,
    requests: Mutex<Vec<GenerateRequest>>,
}

#[allow(dead_code)]
impl MockDriver {
    /// Answer every request with `text for <session key>`.
    pub fn echo() -> Self {
        Self::with_responder(|req| Ok(format!("text for {}", req.session_key())))
    }

    /// Echo, except the request with `session_key` fails with a provider error.
    pub fn failing_on(session_key: &'static str) -> Self {
        Self::with_responder(move |req| {
            if req.session_key() == session_key {
                Err(BollybookError::from(GenerationError::new(
                    GenerationErrorKind::Provider {
                        status: 500,
                        message: "upstream exploded".to_string(),
                    },
                )))
            } else {
                Ok(format!("text for {}", req.session_key()))
            }
        })
    }

    /// Answer with a custom closure.
    pub fn with_responder(
        respond: impl Fn(&GenerateRequest) -> BollybookResult<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering for as long as `delay` says.
    pub fn delayed(
        mut self,
        delay: impl Fn(&GenerateRequest) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Session keys received so far, in arrival order.
    pub fn session_keys(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.session_key().clone())
            .collect()
    }

    /// Number of times generate() was called.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl BollybookDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> BollybookResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(req)).await;
        }
        let text = (self.respond)(req)?;
        Ok(GenerateResponse {
            outputs: vec![Output::Text(text)],
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
