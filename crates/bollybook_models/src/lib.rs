//! LLM provider drivers for Bollybook.
//!
//! The only provider today speaks the OpenAI chat-completions protocol, which
//! also covers gateways and local servers exposing the same endpoint.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;

pub use openai::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, ChoiceMessage,
    OpenAiClient, OpenAiConfig, OpenAiConfigBuilder, Usage, from_chat_response, to_chat_request,
};
