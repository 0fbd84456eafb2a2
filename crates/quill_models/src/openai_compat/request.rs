//! Chat-completion request wire types.

use quill_core::{GenerateRequest, Message};
use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completion request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for sampling (0.0 - 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Top-p sampling parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Enable streaming mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl ChatCompletionRequest {
    /// Translate a generic request for `model`. Streaming is always disabled.
    pub fn from_generate(req: &GenerateRequest, model: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: req.messages().iter().map(ChatMessage::from).collect(),
            max_tokens: *req.max_tokens(),
            temperature: *req.temperature(),
            top_p: *req.top_p(),
            stream: Some(false),
        }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Message content
    pub content: String,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.as_str().to_string(),
            content: message.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{Prompt, SamplingParams};

    #[test]
    fn serializes_sampling_fields_and_disables_streaming() {
        let prompt = Prompt::from(vec![
            Message::system("rules"),
            Message::user("Write a professional script."),
            Message::assistant("Example."),
        ]);
        let req = GenerateRequest::from_prompt(prompt, &SamplingParams::generation());
        let chat = ChatCompletionRequest::from_generate(&req, "llama-3.3-70b-versatile");

        let json = serde_json::to_value(&chat).unwrap();
        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["max_tokens"], 400);
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][2]["role"], "assistant");
        assert_eq!(json["messages"][2]["content"], "Example.");
    }

    #[test]
    fn unset_sampling_fields_are_omitted() {
        let req = GenerateRequest::builder()
            .messages(vec![Message::user("hi")])
            .build()
            .unwrap();
        let chat = ChatCompletionRequest::from_generate(&req, "llama-3.1-8b-instant");

        let json = serde_json::to_value(&chat).unwrap();
        assert_eq!(json["model"], "llama-3.1-8b-instant");
        assert!(json.get("top_p").is_none());
        assert!(json.get("max_tokens").is_none());
    }
}
