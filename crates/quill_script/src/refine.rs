//! Session-scoped refinement of a previously generated script.

use crate::{LengthConstraintEnforcer, PromptBuilder};
use quill_core::GenerationResult;
use quill_error::QuillResult;
use quill_interface::SessionStore;
use std::sync::Arc;
use tracing::{info, instrument};

/// Default number of refinement rounds.
pub const DEFAULT_REFINE_ATTEMPTS: usize = 3;

/// Applies a user's requested changes to the script stored for a session.
#[derive(Debug, Clone)]
pub struct RefinementController {
    prompts: Arc<PromptBuilder>,
    enforcer: Arc<LengthConstraintEnforcer>,
    store: Arc<dyn SessionStore>,
    max_attempts: usize,
}

impl RefinementController {
    /// Create a controller making up to [`DEFAULT_REFINE_ATTEMPTS`] rounds.
    pub fn new(
        prompts: Arc<PromptBuilder>,
        enforcer: Arc<LengthConstraintEnforcer>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            prompts,
            enforcer,
            store,
            max_attempts: DEFAULT_REFINE_ATTEMPTS,
        }
    }

    /// Set the refinement round budget.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Refine the session's script and store the result in its place.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` session error when the session has no script, or
    /// the provider error that interrupted refinement. The store is left
    /// untouched on error.
    #[instrument(skip(self, refinement), fields(refinement_len = refinement.len()))]
    pub async fn refine(
        &self,
        session_id: &str,
        refinement: &str,
    ) -> QuillResult<GenerationResult> {
        let previous = self.store.get(session_id).await?;

        let seed = self.prompts.refine_prompt(&previous, refinement);
        let prompts = &self.prompts;
        let result = self
            .enforcer
            .refine_with_constraint(seed, self.max_attempts, |text, count| {
                prompts.correction_prompt(text, count)
            })
            .await?;

        self.store.put(session_id, result.text().clone()).await?;
        info!(
            word_count = result.word_count(),
            attempts = result.attempts(),
            "Stored refined script"
        );
        Ok(result)
    }
}
