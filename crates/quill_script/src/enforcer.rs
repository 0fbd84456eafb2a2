//! Word-count correction loop around completion calls.

use quill_core::{
    GenerateRequest, GenerationResult, Prompt, SamplingParams, WordRange, word_count,
};
use quill_error::QuillResult;
use quill_interface::QuillDriver;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Drives a completion provider until its output fits a word range, within a
/// fixed call budget.
///
/// Missing the range is not an error: the last attempt is returned with
/// `within_target` unset. Provider failures propagate immediately and are
/// never retried here.
#[derive(Clone)]
pub struct LengthConstraintEnforcer {
    driver: Arc<dyn QuillDriver>,
    range: WordRange,
}

impl std::fmt::Debug for LengthConstraintEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LengthConstraintEnforcer")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .field("range", &self.range)
            .finish()
    }
}

impl LengthConstraintEnforcer {
    /// Create an enforcer around `driver`.
    pub fn new(driver: Arc<dyn QuillDriver>, range: WordRange) -> Self {
        Self { driver, range }
    }

    /// Target word range.
    pub fn range(&self) -> WordRange {
        self.range
    }

    async fn complete(&self, prompt: Prompt, params: &SamplingParams) -> QuillResult<String> {
        let request = GenerateRequest::from_prompt(prompt, params);
        let response = self.driver.generate(&request).await?;
        Ok(response.text().to_string())
    }

    /// Generate once, and if the text misses the range, make exactly one
    /// correction call built from the first text.
    ///
    /// The correction output is accepted whatever its length.
    #[instrument(skip_all, fields(messages = prompt.len(), range = %self.range))]
    pub async fn generate_with_constraint<F>(
        &self,
        prompt: Prompt,
        correction: F,
    ) -> QuillResult<GenerationResult>
    where
        F: FnOnce(&str) -> Prompt + Send,
    {
        let first = self.complete(prompt, &SamplingParams::generation()).await?;
        let count = word_count(&first);
        debug!(attempt = 1, word_count = count, "Generated script");

        if self.range.contains(count) {
            info!(word_count = count, "Script accepted");
            return Ok(GenerationResult::measure(first, self.range, 1));
        }

        let second = self
            .complete(correction(first.as_str()), &SamplingParams::correction())
            .await?;
        let result = GenerationResult::measure(second, self.range, 2);
        debug!(attempt = 2, word_count = result.word_count(), "Rewrote script");

        if result.within_target() {
            info!(word_count = result.word_count(), "Script accepted after rewrite");
        } else {
            warn!(
                word_count = result.word_count(),
                "Rewrite still outside target range, returning it anyway"
            );
        }
        Ok(result)
    }

    /// Refine from `seed` for up to `max_attempts` rounds, stopping at the
    /// first in-range text.
    ///
    /// Each later round sends only `correction(previous_text, previous_count)`.
    /// A `max_attempts` of 0 is treated as 1.
    #[instrument(
        skip_all,
        fields(messages = seed.len(), max_attempts = max_attempts, range = %self.range)
    )]
    pub async fn refine_with_constraint<F>(
        &self,
        seed: Prompt,
        max_attempts: usize,
        correction: F,
    ) -> QuillResult<GenerationResult>
    where
        F: Fn(&str, usize) -> Prompt + Send + Sync,
    {
        let max_attempts = max_attempts.max(1);
        let params = SamplingParams::refinement();

        let first = self.complete(seed, &params).await?;
        let mut result = GenerationResult::measure(first, self.range, 1);
        debug!(attempt = 1, word_count = result.word_count(), "Refined script");

        for attempt in 2..=max_attempts {
            if result.within_target() {
                break;
            }
            let prompt = correction(result.text().as_str(), *result.word_count());
            let text = self.complete(prompt, &params).await?;
            result = GenerationResult::measure(text, self.range, attempt);
            debug!(attempt, word_count = result.word_count(), "Refined script");
        }

        if result.within_target() {
            info!(
                attempts = result.attempts(),
                word_count = result.word_count(),
                "Refinement accepted"
            );
        } else {
            warn!(
                attempts = result.attempts(),
                word_count = result.word_count(),
                "Refinement attempts exhausted, returning last attempt"
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::Message;
    use quill_error::ProviderErrorKind;
    use quill_models::mock::{MockDriver, MockResponse, filler_text};

    fn enforcer(mock: &Arc<MockDriver>) -> LengthConstraintEnforcer {
        LengthConstraintEnforcer::new(mock.clone(), WordRange::default())
    }

    fn seed() -> Prompt {
        Prompt::from(vec![Message::user("Write a professional script about: tea.")])
    }

    fn rewrite(text: &str) -> Prompt {
        Prompt::from(vec![Message::user(format!("Rewrite: {}", text))])
    }

    fn correct(text: &str, count: usize) -> Prompt {
        Prompt::from(vec![
            Message::system(format!("You generated a script with {} words.", count)),
            Message::assistant(text),
        ])
    }

    #[tokio::test]
    async fn in_range_generation_makes_one_call() {
        let mock = Arc::new(MockDriver::new(vec![MockResponse::words(200)]));
        let result = enforcer(&mock)
            .generate_with_constraint(seed(), rewrite)
            .await
            .unwrap();

        assert_eq!(mock.call_count(), 1);
        assert_eq!(*result.attempts(), 1);
        assert_eq!(*result.word_count(), 200);
        assert!(result.within_target());
        assert_eq!(*mock.requests()[0].temperature(), Some(0.7));
    }

    #[tokio::test]
    async fn out_of_range_generation_accepts_second_output() {
        let mock = Arc::new(MockDriver::new(vec![
            MockResponse::words(50),
            MockResponse::words(300),
        ]));
        let result = enforcer(&mock)
            .generate_with_constraint(seed(), rewrite)
            .await
            .unwrap();

        assert_eq!(mock.call_count(), 2);
        assert_eq!(*result.word_count(), 300);
        assert!(!result.within_target());

        let requests = mock.requests();
        let correction = &requests[1];
        assert_eq!(*correction.temperature(), Some(0.5));
        assert_eq!(*correction.max_tokens(), Some(400));
        assert!(correction.messages()[0].content.contains(&filler_text(50)));
    }

    #[tokio::test]
    async fn refinement_stops_on_first_in_range_result() {
        let mock = Arc::new(MockDriver::new(vec![
            MockResponse::words(120),
            MockResponse::words(205),
            MockResponse::words(400),
        ]));
        let result = enforcer(&mock)
            .refine_with_constraint(seed(), 3, correct)
            .await
            .unwrap();

        assert_eq!(mock.call_count(), 2);
        assert_eq!(*result.attempts(), 2);
        assert!(result.within_target());

        let requests = mock.requests();
        let second = &requests[1];
        assert_eq!(second.messages().len(), 2);
        assert_eq!(
            second.messages()[0].content,
            "You generated a script with 120 words."
        );
        assert_eq!(*second.top_p(), Some(1.0));
    }

    #[tokio::test]
    async fn refinement_returns_last_attempt_when_all_miss() {
        let mock = Arc::new(MockDriver::new(vec![
            MockResponse::words(100),
            MockResponse::words(150),
            MockResponse::words(250),
        ]));
        let result = enforcer(&mock)
            .refine_with_constraint(seed(), 3, correct)
            .await
            .unwrap();

        assert_eq!(mock.call_count(), 3);
        assert_eq!(*result.word_count(), 250);
        assert!(!result.within_target());
    }

    #[tokio::test]
    async fn zero_attempts_still_calls_once() {
        let mock = Arc::new(MockDriver::new(vec![MockResponse::words(10)]));
        let result = enforcer(&mock)
            .refine_with_constraint(seed(), 0, correct)
            .await
            .unwrap();

        assert_eq!(mock.call_count(), 1);
        assert_eq!(*result.attempts(), 1);
    }

    #[tokio::test]
    async fn provider_failure_propagates_without_retry() {
        let mock = Arc::new(MockDriver::new_error(ProviderErrorKind::RateLimit));
        let err = enforcer(&mock)
            .generate_with_constraint(seed(), rewrite)
            .await
            .unwrap_err();

        assert_eq!(mock.call_count(), 1);
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn output_is_trimmed_before_counting() {
        let padded = format!("\n\n  {}  \n", filler_text(195));
        let mock = Arc::new(MockDriver::new_success(padded));
        let result = enforcer(&mock)
            .generate_with_constraint(seed(), rewrite)
            .await
            .unwrap();

        assert_eq!(result.text(), &filler_text(195));
    }
}
