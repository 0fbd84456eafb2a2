//! Core data types for the Quill script generation service.
//!
//! This crate provides the foundation types shared by the provider driver,
//! the generation control loop, and the HTTP layer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod params;
mod prompt;
mod request;
mod result;
mod role;
mod words;

pub use message::Message;
pub use params::SamplingParams;
pub use prompt::Prompt;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use result::GenerationResult;
pub use role::Role;
pub use words::{WordRange, word_count};
