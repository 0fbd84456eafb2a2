//! Error types for the Quill script generation service.
//!
//! This crate provides the foundation error types used throughout the Quill workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use quill_error::{QuillResult, SessionError, SessionErrorKind};
//!
//! fn lookup(id: &str) -> QuillResult<String> {
//!     Err(SessionError::new(SessionErrorKind::NotFound(id.to_string())))?
//! }
//!
//! let err = lookup("session_missing").unwrap_err();
//! assert!(err.is_not_found());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod corpus;
mod error;
mod provider;
mod server;
mod session;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use corpus::CorpusError;
pub use error::{QuillError, QuillErrorKind, QuillResult};
pub use provider::{ProviderError, ProviderErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use session::{SessionError, SessionErrorKind};
