//! Session store errors.

/// Kinds of session errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SessionErrorKind {
    /// No prior script is stored under the id
    #[display("No prior script for session: {}", _0)]
    NotFound(String),
}

/// Session error with location tracking.
///
/// # Examples
///
/// ```
/// use quill_error::{SessionError, SessionErrorKind};
///
/// let err = SessionError::new(SessionErrorKind::NotFound("session_1".to_string()));
/// assert!(format!("{}", err).contains("session_1"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Session Error: {} at line {} in {}", kind, line, file)]
pub struct SessionError {
    /// The kind of error that occurred
    pub kind: SessionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SessionError {
    /// Create a new session error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
