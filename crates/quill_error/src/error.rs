//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, ProviderError, ServerError, SessionError, SessionErrorKind,
};

/// The foundation error enum covering every failure in the workspace.
///
/// # Examples
///
/// ```
/// use quill_error::{ConfigError, QuillError};
///
/// let err: QuillError = ConfigError::new("Missing field").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum QuillErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Completion provider failure
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Session lookup or storage failure
    #[from(SessionError)]
    Session(SessionError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// HTTP server process error
    #[from(ServerError)]
    Server(ServerError),
}

/// Quill error with kind discrimination.
///
/// # Examples
///
/// ```
/// use quill_error::{ProviderError, ProviderErrorKind, QuillResult};
///
/// fn call_provider() -> QuillResult<String> {
///     Err(ProviderError::new(ProviderErrorKind::RateLimit))?
/// }
///
/// match call_provider() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Quill Error: {}", _0)]
pub struct QuillError(Box<QuillErrorKind>);

impl QuillError {
    /// Create a new error from a kind.
    pub fn new(kind: QuillErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &QuillErrorKind {
        &self.0
    }

    /// Whether this error means a session id has no stored script.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind(),
            QuillErrorKind::Session(SessionError {
                kind: SessionErrorKind::NotFound(_),
                ..
            })
        )
    }
}

// Generic From implementation for any type that converts to QuillErrorKind
impl<T> From<T> for QuillError
where
    T: Into<QuillErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Quill operations.
pub type QuillResult<T> = std::result::Result<T, QuillError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;

    #[test]
    fn not_found_is_detected_through_the_box() {
        let err: QuillError =
            SessionError::new(SessionErrorKind::NotFound("session_x".into())).into();
        assert!(err.is_not_found());
    }

    #[test]
    fn provider_errors_are_not_not_found() {
        let err: QuillError = ProviderError::new(ProviderErrorKind::EmptyResponse).into();
        assert!(!err.is_not_found());
        assert!(format!("{}", err).contains("no choices"));
    }
}
