//! Request and response types for LLM generation.

use crate::{Message, Prompt, SamplingParams};
use serde::{Deserialize, Serialize};

/// Generic generation request.
///
/// # Examples
///
/// ```
/// use quill_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .max_tokens(100)
///     .temperature(0.7)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 1);
/// assert_eq!(*request.max_tokens(), Some(100));
/// assert_eq!(*request.top_p(), None);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Default,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(build_fn(error = "quill_error::BuilderError"))]
pub struct GenerateRequest {
    /// The prompt messages to send, in order
    #[builder(setter(into))]
    messages: Vec<Message>,
    /// Maximum number of tokens to generate
    #[builder(default, setter(strip_option))]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default, setter(strip_option))]
    temperature: Option<f32>,
    /// Nucleus sampling probability mass
    #[builder(default, setter(strip_option))]
    top_p: Option<f32>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Build a request that sends `prompt` verbatim with the given sampling parameters.
    pub fn from_prompt(prompt: Prompt, params: &SamplingParams) -> Self {
        Self {
            messages: prompt.into_messages(),
            max_tokens: Some(params.max_tokens),
            temperature: Some(params.temperature),
            top_p: Some(params.top_p),
        }
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use quill_core::GenerateResponse;
///
/// let response = GenerateResponse::new("  A quiet harbor at dawn.\n");
/// assert_eq!(response.text(), "A quiet harbor at dawn.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Raw completion text as returned by the provider
    pub content: String,
}

impl GenerateResponse {
    /// Wrap raw completion text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Completion text with surrounding whitespace removed.
    pub fn text(&self) -> &str {
        self.content.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_prompt_copies_sampling_params() {
        let prompt = Prompt::from(vec![Message::system("rules"), Message::user("topic")]);
        let request = GenerateRequest::from_prompt(prompt, &SamplingParams::refinement());

        assert_eq!(request.messages().len(), 2);
        assert_eq!(*request.max_tokens(), Some(300));
        assert_eq!(*request.temperature(), Some(0.7));
        assert_eq!(*request.top_p(), Some(1.0));
    }

    #[test]
    fn builder_requires_messages() {
        let err = GenerateRequest::builder().max_tokens(10u32).build().unwrap_err();
        assert_eq!(
            err.kind(),
            &quill_error::BuilderErrorKind::MissingField("messages".to_string())
        );
    }
}
