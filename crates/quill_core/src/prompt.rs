//! Ordered message sequences sent verbatim to the completion provider.

use crate::{Message, Role};
use serde::{Deserialize, Serialize};

/// An ordered sequence of messages.
///
/// # Examples
///
/// ```
/// use quill_core::{Message, Prompt, Role};
///
/// let mut prompt = Prompt::new();
/// prompt.push(Message::system("You are a professional scriptwriter."));
/// prompt.push(Message::user("Write a professional script about: tides."));
///
/// assert_eq!(prompt.len(), 2);
/// assert_eq!(prompt.roles(), vec![Role::System, Role::User]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prompt {
    messages: Vec<Message>,
}

impl Prompt {
    /// Create an empty prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Messages in send order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Consume the prompt, returning its messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the prompt has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Roles in send order.
    pub fn roles(&self) -> Vec<Role> {
        self.messages.iter().map(|m| m.role).collect()
    }

    /// Content of the final message, if any.
    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}

impl From<Vec<Message>> for Prompt {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

impl IntoIterator for Prompt {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}
