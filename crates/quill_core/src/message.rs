//! Message types for prompts.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single text message in a prompt.
///
/// # Examples
///
/// ```
/// use quill_core::{Message, Role};
///
/// let message = Message::user("Write a professional script.");
///
/// assert_eq!(message.role, Role::User);
/// assert!(message.content.starts_with("Write"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The text content of the message
    pub content: String,
}

impl Message {
    /// Create a new message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
