//! HTTP client for OpenAI-compatible chat-completion endpoints.

use super::{ChatCompletionRequest, ChatCompletionResponse};
use quill_core::{GenerateRequest, GenerateResponse};
use std::time::Duration;
use tracing::instrument;

/// Failure modes of an OpenAI-compatible endpoint, before provider attribution.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum OpenAICompatError {
    /// Transport-level failure
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// Non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// HTTP 429
    #[display("Rate limit exceeded")]
    RateLimit,
    /// HTTP 404; a wrong base URL looks the same as an unknown model
    #[display("Model not found: {} ({})", model, message)]
    ModelNotFound {
        /// Model that was requested
        model: String,
        /// Response body
        message: String,
    },
    /// Body could not be decoded
    #[display("Failed to parse response: {}", _0)]
    ResponseParsing(String),
    /// Response carried no choices
    #[display("Response contained no choices")]
    EmptyResponse,
    /// HTTP client could not be constructed
    #[display("Client build error: {}", _0)]
    Builder(String),
}

/// Client for any chat-completions endpoint speaking the OpenAI wire format.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
    provider: &'static str,
}

impl OpenAICompatibleClient {
    /// Create a client whose requests fail after `timeout`.
    #[instrument(skip_all, fields(provider = provider, model = %model, url = %url))]
    pub fn with_timeout(
        api_key: String,
        model: String,
        url: String,
        provider: &'static str,
        timeout: Duration,
    ) -> Result<Self, OpenAICompatError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OpenAICompatError::Builder(e.to_string()))?;

        tracing::debug!(?timeout, "Created OpenAI-compatible client");

        Ok(Self {
            client,
            api_key,
            model,
            url,
            provider,
        })
    }

    /// Provider name used in logs and errors.
    pub fn provider_name(&self) -> &'static str {
        self.provider
    }

    /// Default model identifier.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send a chat completion request.
    #[instrument(skip(self, request), fields(provider = self.provider, model = %request.model, messages = request.messages.len()))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAICompatError> {
        tracing::debug!("Sending chat completion request to {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request failed: {}", e);
                OpenAICompatError::Http(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "Provider returned error");
            return Err(status_error(status.as_u16(), &request.model, body));
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            OpenAICompatError::Http(e.to_string())
        })?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            OpenAICompatError::ResponseParsing(e.to_string())
        })
    }

    /// Generate a completion for a generic request.
    pub async fn generate(
        &self,
        req: &GenerateRequest,
    ) -> Result<GenerateResponse, OpenAICompatError> {
        let chat_request = ChatCompletionRequest::from_generate(req, &self.model);
        let response = self.chat_completion(&chat_request).await?;
        into_generate_response(response)
    }
}

/// Map a non-success status and its body to an error.
fn status_error(status: u16, model: &str, body: String) -> OpenAICompatError {
    match status {
        429 => OpenAICompatError::RateLimit,
        404 => OpenAICompatError::ModelNotFound {
            model: model.to_string(),
            message: body,
        },
        code => OpenAICompatError::Api {
            status: code,
            message: body,
        },
    }
}

/// Take the first choice's content; an absent content field counts as empty text.
pub(crate) fn into_generate_response(
    response: ChatCompletionResponse,
) -> Result<GenerateResponse, OpenAICompatError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(OpenAICompatError::EmptyResponse)?;

    if let Some(usage) = response.usage {
        tracing::debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "Chat completion successful"
        );
    }

    Ok(GenerateResponse::new(choice.message.content.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Choice, ChoiceMessage, Usage};

    fn response_with(choices: Vec<Choice>) -> ChatCompletionResponse {
        ChatCompletionResponse {
            id: "chatcmpl-1".into(),
            model: "llama-3.3-70b-versatile".into(),
            choices,
            usage: Some(Usage {
                prompt_tokens: 5,
                completion_tokens: 2,
                total_tokens: 7,
            }),
        }
    }

    #[test]
    fn first_choice_becomes_the_response() {
        let response = response_with(vec![Choice {
            index: 0,
            message: ChoiceMessage {
                role: "assistant".into(),
                content: Some("  Hello there.  ".into()),
            },
            finish_reason: Some("stop".into()),
        }]);

        let generated = into_generate_response(response).unwrap();
        assert_eq!(generated.text(), "Hello there.");
    }

    #[test]
    fn missing_content_is_empty_text() {
        let response = response_with(vec![Choice {
            index: 0,
            message: ChoiceMessage {
                role: "assistant".into(),
                content: None,
            },
            finish_reason: None,
        }]);

        assert_eq!(into_generate_response(response).unwrap().text(), "");
    }

    #[test]
    fn no_choices_is_an_error() {
        let err = into_generate_response(response_with(vec![])).unwrap_err();
        assert_eq!(err, OpenAICompatError::EmptyResponse);
    }

    #[test]
    fn not_found_keeps_the_body() {
        let err = status_error(
            404,
            "llama-3.3-70b-versatile",
            "unknown route /v1/chat".into(),
        );
        assert_eq!(
            err,
            OpenAICompatError::ModelNotFound {
                model: "llama-3.3-70b-versatile".into(),
                message: "unknown route /v1/chat".into(),
            }
        );
        assert!(err.to_string().contains("unknown route /v1/chat"));
    }

    #[test]
    fn other_statuses_map_to_rate_limit_or_api() {
        assert_eq!(status_error(429, "m", "slow down".into()), OpenAICompatError::RateLimit);
        assert_eq!(
            status_error(500, "m", "boom".into()),
            OpenAICompatError::Api {
                status: 500,
                message: "boom".into(),
            }
        );
    }
}
