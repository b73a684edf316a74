//! Conversion between Bollybook and chat-completions API types

use super::dto::{
    ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse, ChatMessage,
};
use bollybook_core::{GenerateRequest, GenerateResponse, Message, Output};
use bollybook_error::{GenerationError, GenerationErrorKind};

/// Convert a [`GenerateRequest`] to a chat completion request.
///
/// The request's own model wins over `default_model`. An empty session key is
/// not forwarded.
#[tracing::instrument(skip(request), fields(session = %request.session_key()))]
pub fn to_chat_request(
    request: &GenerateRequest,
    default_model: &str,
) -> Result<ChatCompletionRequest, GenerationError> {
    let model = request
        .model()
        .clone()
        .unwrap_or_else(|| default_model.to_string());
    let user = Some(request.session_key().clone()).filter(|k| !k.is_empty());

    ChatCompletionRequestBuilder::default()
        .model(model)
        .messages(request.messages().iter().map(to_chat_message).collect::<Vec<_>>())
        .max_tokens(*request.max_tokens())
        .temperature(*request.temperature())
        .user(user)
        .build()
        .map_err(|e| GenerationError::new(GenerationErrorKind::Builder(e.to_string())))
}

fn to_chat_message(msg: &Message) -> ChatMessage {
    ChatMessage {
        role: msg.role.to_string(),
        content: msg.content.clone(),
    }
}

/// Convert a chat completion response to a [`GenerateResponse`].
///
/// Only the first choice is used.
#[tracing::instrument(skip(response), fields(id = %response.id))]
pub fn from_chat_response(
    response: ChatCompletionResponse,
) -> Result<GenerateResponse, GenerationError> {
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        GenerationError::new(GenerationErrorKind::Parse(
            "No choices in response".to_string(),
        ))
    })?;

    let mut outputs = Vec::new();
    if let Some(text) = choice.message.content {
        outputs.push(Output::Text(text));
    }
    if let Some(refusal) = choice.message.refusal {
        outputs.push(Output::Refusal(refusal));
    }

    Ok(GenerateResponse { outputs })
}
