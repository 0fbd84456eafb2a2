//! Generation followed by refinement against a scripted provider.

use quill_core::WordRange;
use quill_interface::SessionStore;
use quill_models::mock::{MockDriver, MockResponse, filler_text};
use quill_script::{
    ExampleCorpus, InMemorySessionStore, LengthConstraintEnforcer, PromptBuilder,
    RefinementController, ScriptWriter, SessionIdGenerator, SessionIdStrategy,
};
use std::io::Write;
use std::sync::Arc;

struct Harness {
    writer: ScriptWriter,
    refiner: RefinementController,
    store: Arc<InMemorySessionStore>,
}

fn harness(driver: Arc<MockDriver>, corpus: ExampleCorpus, ids: SessionIdStrategy) -> Harness {
    let range = WordRange::default();
    let prompts = Arc::new(PromptBuilder::new(Arc::new(corpus), 2, range));
    let enforcer = Arc::new(LengthConstraintEnforcer::new(driver, range));
    let store = Arc::new(InMemorySessionStore::new());

    Harness {
        writer: ScriptWriter::new(
            prompts.clone(),
            enforcer.clone(),
            store.clone(),
            SessionIdGenerator::new(ids),
        ),
        refiner: RefinementController::new(prompts, enforcer, store.clone()),
        store,
    }
}

#[tokio::test]
async fn generate_then_refine_overwrites_session() -> anyhow::Result<()> {
    let driver = Arc::new(MockDriver::new(vec![
        MockResponse::words(200),
        MockResponse::Text(filler_text(215).replace("word0", "refined")),
    ]));
    let h = harness(driver.clone(), ExampleCorpus::default(), SessionIdStrategy::Random);

    let written = h.writer.write("a night market").await?;
    assert_eq!(*written.result().word_count(), 200);

    let refined = h.refiner.refine(written.session_id(), "add a twist").await?;
    assert_eq!(*refined.word_count(), 215);
    assert_eq!(*refined.attempts(), 1);

    let stored = h.store.get(written.session_id()).await?;
    assert!(stored.starts_with("refined"));
    assert_eq!(driver.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn corpus_file_feeds_few_shot_examples() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, "First example.\n---\nSecond example.\n---\n")?;

    let driver = Arc::new(MockDriver::new_success(filler_text(190)));
    let h = harness(
        driver.clone(),
        ExampleCorpus::load(file.path()),
        SessionIdStrategy::Random,
    );
    h.writer.write("lighthouses").await?;

    let requests = driver.requests();
    let contents: Vec<&str> = requests[0]
        .messages()
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(contents.len(), 6);
    assert!(contents.contains(&"First example."));
    assert!(contents.contains(&"Second example."));
    Ok(())
}

#[tokio::test]
async fn topic_hash_sessions_collide_on_identical_topics() -> anyhow::Result<()> {
    let driver = Arc::new(MockDriver::new(vec![
        MockResponse::words(200),
        MockResponse::words(201),
    ]));
    let h = harness(driver, ExampleCorpus::default(), SessionIdStrategy::TopicHash);

    let first = h.writer.write("tea").await?;
    let second = h.writer.write("tea").await?;

    assert_eq!(first.session_id(), second.session_id());
    assert_eq!(h.store.len().await, 1);
    assert_eq!(h.store.get(first.session_id()).await?, filler_text(201));
    Ok(())
}

#[tokio::test]
async fn random_sessions_stay_independent() -> anyhow::Result<()> {
    let driver = Arc::new(MockDriver::new_success(filler_text(200)));
    let h = harness(driver, ExampleCorpus::default(), SessionIdStrategy::Random);

    let first = h.writer.write("tea").await?;
    let second = h.writer.write("tea").await?;

    assert_ne!(first.session_id(), second.session_id());
    assert_eq!(h.store.len().await, 2);
    Ok(())
}
