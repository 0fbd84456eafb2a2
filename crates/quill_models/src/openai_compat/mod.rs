//! Generic client for OpenAI-compatible chat-completion APIs.

mod client;
mod request;
mod response;

pub use client::{OpenAICompatError, OpenAICompatibleClient};
pub use request::{ChatCompletionRequest, ChatMessage};
pub use response::{ChatCompletionResponse, Choice, ChoiceMessage, Usage};
