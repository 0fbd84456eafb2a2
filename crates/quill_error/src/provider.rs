//! Completion provider errors.

/// Provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Transport failure (connection refused, timeout, TLS)
    #[display("HTTP error: {}", _0)]
    Http(String),

    /// Non-success status returned by the API
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// The provider rejected the call for exceeding its rate limit
    #[display("Rate limit exceeded")]
    RateLimit,

    /// HTTP 404: the model is unknown or the endpoint URL is wrong
    #[display("Model not found: {} ({})", model, message)]
    ModelNotFound {
        /// Model that was requested
        model: String,
        /// Response body
        message: String,
    },

    /// The response body could not be decoded
    #[display("Failed to parse response: {}", _0)]
    ResponseParsing(String),

    /// The response contained no completion choices
    #[display("Response contained no choices")]
    EmptyResponse,
}

/// Provider error with location tracking.
///
/// # Examples
///
/// ```
/// use quill_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::RateLimit);
/// assert!(format!("{}", err).contains("Rate limit"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error ({}): {} at {}:{}", provider, kind, file, line)]
pub struct ProviderError {
    /// Name of the provider that failed (e.g., "groq")
    pub provider: &'static str,
    /// The specific error kind
    pub kind: ProviderErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new provider error attributed to an unnamed provider.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        Self::for_provider("unknown", kind)
    }

    /// Create a new provider error attributed to the named provider.
    #[track_caller]
    pub fn for_provider(provider: &'static str, kind: ProviderErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            provider,
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
