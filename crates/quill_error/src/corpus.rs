//! Example corpus loading errors.

/// Failure to read the few-shot example resource.
///
/// Log-only: callers recover by treating the corpus as empty, so this never
/// becomes a [`QuillError`](crate::QuillError). It exists to log the failure
/// with its location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Corpus Error: {} ({}) at line {} in {}", message, path, line, file)]
pub struct CorpusError {
    /// Path of the resource that failed to load
    pub path: String,
    /// Underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl CorpusError {
    /// Create a new CorpusError for the given resource path.
    #[track_caller]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            path: path.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_path_message_and_location() {
        let err = CorpusError::new("data/example_scripts.txt", "No such file");
        let rendered = err.to_string();
        assert!(rendered.contains("data/example_scripts.txt"));
        assert!(rendered.contains("No such file"));
        assert!(rendered.contains(file!()));
        assert_eq!(err.file, file!());
    }
}
