//! In-memory session storage and session id derivation.

use async_trait::async_trait;
use quill_error::{QuillResult, SessionError, SessionErrorKind};
use quill_interface::SessionStore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Session store holding the last accepted script per session id.
///
/// Contents live for the lifetime of the process; nothing is ever evicted.
///
/// # Example
/// ```
/// use quill_interface::SessionStore;
/// use quill_script::InMemorySessionStore;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemorySessionStore::new();
/// store.put("session_1", "First draft.".to_string()).await?;
/// store.put("session_1", "Second draft.".to_string()).await?;
/// assert_eq!(store.get("session_1").await?, "Second draft.");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    scripts: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, id: &str, text: String) -> QuillResult<()> {
        debug!(session_id = %id, "Storing script");
        self.scripts.write().await.insert(id.to_string(), text);
        Ok(())
    }

    async fn get(&self, id: &str) -> QuillResult<String> {
        self.scripts
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::new(SessionErrorKind::NotFound(id.to_string())).into())
    }

    async fn len(&self) -> usize {
        self.scripts.read().await.len()
    }
}

/// How session ids are derived from a generation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionIdStrategy {
    /// Fresh random id per request.
    #[default]
    Random,
    /// SHA-256 of the topic. Identical topics share, and overwrite, one session.
    TopicHash,
}

/// Produces session ids according to a [`SessionIdStrategy`].
///
/// # Examples
///
/// ```
/// use quill_script::{SessionIdGenerator, SessionIdStrategy};
///
/// let ids = SessionIdGenerator::new(SessionIdStrategy::TopicHash);
/// assert_eq!(ids.generate("tea"), ids.generate("tea"));
/// assert!(ids.generate("tea").starts_with("session_"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionIdGenerator {
    strategy: SessionIdStrategy,
}

impl SessionIdGenerator {
    /// Create a generator for `strategy`.
    pub fn new(strategy: SessionIdStrategy) -> Self {
        Self { strategy }
    }

    /// Active strategy.
    pub fn strategy(&self) -> SessionIdStrategy {
        self.strategy
    }

    /// Session id for a request about `topic`.
    pub fn generate(&self, topic: &str) -> String {
        match self.strategy {
            SessionIdStrategy::Random => format!("session_{}", uuid::Uuid::new_v4().simple()),
            SessionIdStrategy::TopicHash => {
                let digest = Sha256::digest(topic.as_bytes());
                let mut id = String::with_capacity("session_".len() + digest.len() * 2);
                id.push_str("session_");
                for byte in digest {
                    let _ = write!(id, "{:02x}", byte);
                }
                id
            }
        }
    }
}
