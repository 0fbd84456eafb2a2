//! Trait definitions for the Quill script generation service.
//!
//! The generation loop talks to its two external collaborators only through
//! these traits: the completion provider ([`QuillDriver`]) and the session
//! store ([`SessionStore`]). Both are object safe so the HTTP layer can hold
//! them as `Arc<dyn ...>` and tests can substitute stubs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{QuillDriver, SessionStore};
