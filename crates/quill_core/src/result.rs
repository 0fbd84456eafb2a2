//! Outcome of a constrained generation.

use crate::{WordRange, word_count};
use serde::{Deserialize, Serialize};

/// Text produced by the generation loop together with its length verdict.
///
/// A result outside the target range is still a successful result; the
/// `within_target` flag tells a compliant script apart from a best-effort miss.
///
/// # Examples
///
/// ```
/// use quill_core::{GenerationResult, WordRange};
///
/// let result = GenerationResult::measure("far too short", WordRange::default(), 2);
/// assert_eq!(*result.word_count(), 3);
/// assert!(!result.within_target());
/// assert_eq!(*result.attempts(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GenerationResult {
    /// Accepted script text
    text: String,
    /// Whitespace-delimited word count of `text`
    word_count: usize,
    /// Whether `word_count` fell inside the target range
    #[getter(skip)]
    within_target: bool,
    /// Completion calls made to produce this result
    attempts: usize,
}

impl GenerationResult {
    /// Count the words of `text` and judge them against `range`.
    pub fn measure(text: impl Into<String>, range: WordRange, attempts: usize) -> Self {
        let text = text.into();
        let word_count = word_count(&text);
        Self {
            within_target: range.contains(word_count),
            text,
            word_count,
            attempts,
        }
    }

    /// Whether the text satisfied the word-count constraint.
    pub fn within_target(&self) -> bool {
        self.within_target
    }

    /// Consume the result, returning the text.
    pub fn into_text(self) -> String {
        self.text
    }
}
