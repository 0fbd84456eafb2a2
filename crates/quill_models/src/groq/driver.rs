//! Groq AI LPU Inference API driver using OpenAI-compatible client.

use crate::openai_compat::{OpenAICompatError, OpenAICompatibleClient};
use async_trait::async_trait;
use quill_core::{GenerateRequest, GenerateResponse};
use quill_error::{ConfigError, ProviderError, ProviderErrorKind, QuillResult};
use quill_interface::QuillDriver;
use std::time::Duration;
use tracing::instrument;

/// Groq's OpenAI-compatible chat-completions endpoint.
pub const GROQ_CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

const PROVIDER: &str = "groq";

/// Groq AI LPU Inference API driver.
#[derive(Debug, Clone)]
pub struct GroqDriver {
    inner: OpenAICompatibleClient,
}

impl GroqDriver {
    /// Creates a new Groq driver.
    ///
    /// Reads API token from `GROQ_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API token is not set.
    #[instrument(skip_all, fields(model = %model.as_ref()))]
    pub fn new(model: impl AsRef<str>) -> QuillResult<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|e| ConfigError::new(format!("GROQ_API_KEY not set: {}", e)))?;

        Self::with_api_key(api_key, model.as_ref())
    }

    /// Creates a new Groq driver with explicit API key against the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    pub fn with_api_key(api_key: impl Into<String>, model: impl Into<String>) -> QuillResult<Self> {
        Self::with_endpoint(
            api_key,
            model,
            GROQ_CHAT_COMPLETIONS_URL,
            Duration::from_secs(60),
        )
    }

    /// Creates a Groq driver against an explicit endpoint with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    #[instrument(skip(api_key, model, url), fields(url = %url.as_ref()))]
    pub fn with_endpoint(
        api_key: impl Into<String>,
        model: impl Into<String>,
        url: impl AsRef<str>,
        timeout: Duration,
    ) -> QuillResult<Self> {
        let inner = OpenAICompatibleClient::with_timeout(
            api_key.into(),
            model.into(),
            url.as_ref().to_string(),
            PROVIDER,
            timeout,
        )
        .map_err(Self::convert_error)?;

        Ok(Self { inner })
    }

    /// Converts OpenAICompatError to a Groq-attributed provider error.
    #[track_caller]
    fn convert_error(error: OpenAICompatError) -> ProviderError {
        let kind = match error {
            OpenAICompatError::Http(msg) => ProviderErrorKind::Http(msg),
            OpenAICompatError::Api { status, message } => {
                ProviderErrorKind::Api { status, message }
            }
            OpenAICompatError::RateLimit => ProviderErrorKind::RateLimit,
            OpenAICompatError::ModelNotFound { model, message } => {
                ProviderErrorKind::ModelNotFound { model, message }
            }
            OpenAICompatError::ResponseParsing(msg) => ProviderErrorKind::ResponseParsing(msg),
            OpenAICompatError::EmptyResponse => ProviderErrorKind::EmptyResponse,
            OpenAICompatError::Builder(msg) => {
                ProviderErrorKind::Http(format!("Builder error: {}", msg))
            }
        };

        ProviderError::for_provider(PROVIDER, kind)
    }
}

#[async_trait]
impl QuillDriver for GroqDriver {
    #[instrument(skip(self, req), fields(provider = "groq", model = %self.inner.model_name()))]
    async fn generate(&self, req: &GenerateRequest) -> QuillResult<GenerateResponse> {
        self.inner
            .generate(req)
            .await
            .map_err(|e| Self::convert_error(e).into())
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
