//! Trait definitions for the completion provider and session storage.

use async_trait::async_trait;
use quill_core::{GenerateRequest, GenerateResponse};
use quill_error::QuillResult;

/// Core trait that every completion backend implements.
///
/// A call sends the request's messages verbatim with its sampling parameters
/// and returns the generated text. Implementations must not retry on their
/// own; transport and provider failures are returned as errors.
#[async_trait]
pub trait QuillDriver: Send + Sync {
    /// Generate a completion for the request.
    async fn generate(&self, req: &GenerateRequest) -> QuillResult<GenerateResponse>;

    /// Provider name (e.g., "groq").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "llama-3.3-70b-versatile").
    fn model_name(&self) -> &str;
}

/// Keyed store holding the last accepted script for each session.
///
/// Writes replace the previous value; concurrent writers to the same key
/// race and the last write wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store `text` under `id`, replacing any previous script.
    async fn put(&self, id: &str, text: String) -> QuillResult<()>;

    /// Fetch the script stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` with kind `NotFound` when nothing was stored.
    async fn get(&self, id: &str) -> QuillResult<String>;

    /// Number of sessions currently held.
    async fn len(&self) -> usize;

    /// Whether the store holds no sessions.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl std::fmt::Debug for dyn SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
