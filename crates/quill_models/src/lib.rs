//! LLM provider integrations for Quill.
//!
//! Groq serves its models through an OpenAI-compatible chat-completions
//! endpoint, so the driver is a thin wrapper around [`OpenAICompatibleClient`].
//! A scripted [`mock::MockDriver`] stands in for the provider in tests.
//!
//! # Example
//!
//! ```no_run
//! use quill_core::{GenerateRequest, Message, SamplingParams};
//! use quill_interface::QuillDriver;
//! use quill_models::GroqDriver;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let driver = GroqDriver::new("llama-3.3-70b-versatile")?;
//! let prompt = vec![Message::user("Write a professional script about: tides.")].into();
//! let request = GenerateRequest::from_prompt(prompt, &SamplingParams::generation());
//! let response = driver.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod groq;
pub mod mock;
mod openai_compat;

pub use groq::{GROQ_CHAT_COMPLETIONS_URL, GroqDriver};
pub use openai_compat::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, ChoiceMessage,
    OpenAICompatError, OpenAICompatibleClient, Usage,
};
