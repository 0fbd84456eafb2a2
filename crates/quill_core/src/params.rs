//! Sampling parameters for completion calls.

use serde::{Deserialize, Serialize};

/// Sampling parameters sent with each completion call.
///
/// Presets cover the three phases of the generation loop.
///
/// # Examples
///
/// ```
/// use quill_core::SamplingParams;
///
/// let first = SamplingParams::generation();
/// let retry = SamplingParams::correction();
///
/// assert!(retry.temperature < first.temperature);
/// assert_eq!(retry.max_tokens, first.max_tokens);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Nucleus sampling probability mass
    pub top_p: f32,
}

impl SamplingParams {
    /// First pass of a fresh generation.
    pub const fn generation() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 400,
            top_p: 0.9,
        }
    }

    /// The single length-correction pass after an out-of-range generation.
    pub const fn correction() -> Self {
        Self {
            temperature: 0.5,
            max_tokens: 400,
            top_p: 0.9,
        }
    }

    /// Every round of the refinement loop.
    pub const fn refinement() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 300,
            top_p: 1.0,
        }
    }
}
