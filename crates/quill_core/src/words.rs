//! Word counting and the target length range.

use serde::{Deserialize, Serialize};

/// Count whitespace-delimited tokens in `text`.
///
/// Punctuation attached to a word is part of that word.
///
/// # Examples
///
/// ```
/// use quill_core::word_count;
///
/// assert_eq!(word_count("Hello, world!  It's\tme.\n"), 4);
/// assert_eq!(word_count("   "), 0);
/// ```
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Inclusive word-count range a script must fall into.
///
/// # Examples
///
/// ```
/// use quill_core::WordRange;
///
/// let range = WordRange::default();
/// assert!(range.contains(190));
/// assert!(range.contains(220));
/// assert!(!range.contains(221));
/// assert_eq!(range.to_string(), "190-220");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("{}-{}", min, max)]
pub struct WordRange {
    /// Smallest accepted word count
    pub min: usize,
    /// Largest accepted word count
    pub max: usize,
}

impl WordRange {
    /// Create a range, swapping the bounds if given in reverse.
    pub fn new(min: usize, max: usize) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Whether `count` lies within the range (inclusive).
    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl Default for WordRange {
    fn default() -> Self {
        Self { min: 190, max: 220 }
    }
}
