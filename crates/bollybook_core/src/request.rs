//! Request and response types for LLM generation.

use crate::Message;
use serde::{Deserialize, Serialize};

/// Provider-neutral generation request.
///
/// `session_key` names the conversational context the request belongs to.
/// Every request is sent with a fresh context; the key is carried for
/// tracing and for providers that can scope state by it.
///
/// # Examples
///
/// ```
/// use bollybook_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .session_key("title_english")
///     .messages(vec![Message::system("persona"), Message::user("prompt")])
///     .model("gpt-4o")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 2);
/// assert_eq!(request.model().as_deref(), Some("gpt-4o"));
/// assert_eq!(*request.max_tokens(), None);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// Conversation scope identifier
    session_key: String,
    /// The messages to send, system first
    messages: Vec<Message>,
    /// Maximum number of tokens to generate
    #[builder(setter(strip_option))]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(setter(strip_option))]
    temperature: Option<f32>,
    /// Model identifier overriding the driver default
    #[builder(setter(strip_option))]
    model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// One piece of model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Generated text
    Text(String),
    /// The model declined to answer
    Refusal(String),
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use bollybook_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Text("Namaste".into()), Output::Text(" Cloud".into())],
/// };
/// assert_eq!(response.text(), "Namaste Cloud");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Concatenated text outputs. Refusals are skipped.
    pub fn text(&self) -> String {
        self.outputs
            .iter()
            .filter_map(|o| match o {
                Output::Text(t) => Some(t.as_str()),
                Output::Refusal(_) => None,
            })
            .collect()
    }
}
