//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Author of a message in a prompt.
///
/// Serializes to the lowercase names chat-completion APIs expect.
///
/// # Examples
///
/// ```
/// use quill_core::Role;
///
/// assert_eq!(format!("{}", Role::System), "system");
/// assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System messages provide instructions
    #[display("system")]
    System,
    /// User messages carry requests and few-shot prompts
    #[display("user")]
    User,
    /// Assistant messages carry model output or few-shot demonstrations
    #[display("assistant")]
    Assistant,
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}
