//! OpenAI-compatible chat-completions driver.

mod client;
mod convert;
mod dto;

pub use client::{OpenAiClient, OpenAiConfig, OpenAiConfigBuilder};
pub use convert::{from_chat_response, to_chat_request};
pub use dto::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, ChoiceMessage, Usage,
};
