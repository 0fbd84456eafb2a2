//! Generation flow: prompt, enforce length, store under a new session.

use crate::{LengthConstraintEnforcer, PromptBuilder, SessionIdGenerator};
use quill_core::GenerationResult;
use quill_error::QuillResult;
use quill_interface::SessionStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// A freshly generated script and the session it was stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct WrittenScript {
    /// Session holding the script for later refinement
    session_id: String,
    /// Generated text and its length verdict
    result: GenerationResult,
}

/// Writes new scripts about user topics.
#[derive(Debug, Clone)]
pub struct ScriptWriter {
    prompts: Arc<PromptBuilder>,
    enforcer: Arc<LengthConstraintEnforcer>,
    store: Arc<dyn SessionStore>,
    ids: SessionIdGenerator,
}

impl ScriptWriter {
    /// Create a writer.
    pub fn new(
        prompts: Arc<PromptBuilder>,
        enforcer: Arc<LengthConstraintEnforcer>,
        store: Arc<dyn SessionStore>,
        ids: SessionIdGenerator,
    ) -> Self {
        Self {
            prompts,
            enforcer,
            store,
            ids,
        }
    }

    /// Generate a script about `topic` and store it under a new session id.
    ///
    /// A script that still misses the word range after its rewrite is stored
    /// and returned with `within_target` unset.
    #[instrument(skip(self, topic), fields(topic_len = topic.len()))]
    pub async fn write(&self, topic: &str) -> QuillResult<WrittenScript> {
        let prompt = self.prompts.generation_prompt(topic);
        let prompts = &self.prompts;
        let result = self
            .enforcer
            .generate_with_constraint(prompt, |first| {
                prompts.refinement_seed(&prompts.rewrite_instruction(first))
            })
            .await?;

        let session_id = self.ids.generate(topic);
        self.store.put(&session_id, result.text().clone()).await?;
        info!(
            session_id = %session_id,
            word_count = result.word_count(),
            "Stored generated script"
        );

        Ok(WrittenScript { session_id, result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExampleCorpus, InMemorySessionStore, SessionIdStrategy};
    use quill_core::{Role, WordRange};
    use quill_models::mock::{MockDriver, MockResponse, filler_text};

    fn writer(mock: Arc<MockDriver>, store: Arc<InMemorySessionStore>) -> ScriptWriter {
        let corpus = ExampleCorpus::from_scripts(vec!["Example one.".into(), "Example two.".into()]);
        let prompts = Arc::new(PromptBuilder::new(Arc::new(corpus), 2, WordRange::default()));
        let enforcer = Arc::new(LengthConstraintEnforcer::new(mock, WordRange::default()));
        ScriptWriter::new(
            prompts,
            enforcer,
            store,
            SessionIdGenerator::new(SessionIdStrategy::TopicHash),
        )
    }

    #[tokio::test]
    async fn stores_script_under_returned_session() {
        let mock = Arc::new(MockDriver::new_success(filler_text(200)));
        let store = Arc::new(InMemorySessionStore::new());

        let written = writer(mock, store.clone()).write("tea").await.unwrap();

        assert!(written.session_id().starts_with("session_"));
        assert_eq!(
            &store.get(written.session_id()).await.unwrap(),
            written.result().text()
        );
    }

    #[tokio::test]
    async fn rewrite_uses_few_shot_seed_with_first_draft() {
        let mock = Arc::new(MockDriver::new(vec![
            MockResponse::words(50),
            MockResponse::words(205),
        ]));
        let store = Arc::new(InMemorySessionStore::new());

        let written = writer(mock.clone(), store).write("tea").await.unwrap();
        assert_eq!(*written.result().word_count(), 205);
        assert!(written.result().within_target());

        let requests = mock.requests();
        let rewrite = &requests[1];
        assert_eq!(rewrite.messages()[0].role, Role::System);
        assert_eq!(rewrite.messages().len(), 6);
        let last = &rewrite.messages()[5].content;
        assert!(last.contains("Rewrite this script to be between 190-220 words"));
        assert!(last.contains(&filler_text(50)));
    }

    #[tokio::test]
    async fn failed_generation_stores_nothing() {
        let mock = Arc::new(MockDriver::new_error(
            quill_error::ProviderErrorKind::EmptyResponse,
        ));
        let store = Arc::new(InMemorySessionStore::new());

        assert!(writer(mock, store.clone()).write("tea").await.is_err());
        assert!(store.is_empty().await);
    }
}
