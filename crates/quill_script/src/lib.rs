//! Constrained script generation and refinement.
//!
//! This crate holds the control loop of the service: few-shot prompt assembly
//! from an example corpus, the word-count correction policy around completion
//! calls, and the session-scoped refinement flow.
//!
//! # Example
//!
//! ```
//! use quill_core::WordRange;
//! use quill_models::mock::{MockDriver, MockResponse};
//! use quill_script::{
//!     ExampleCorpus, InMemorySessionStore, LengthConstraintEnforcer, PromptBuilder,
//!     ScriptWriter, SessionIdGenerator,
//! };
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let corpus = Arc::new(ExampleCorpus::from_scripts(vec!["An example script.".into()]));
//! let prompts = Arc::new(PromptBuilder::new(corpus, 2, WordRange::default()));
//! let driver = Arc::new(MockDriver::new(vec![MockResponse::words(200)]));
//! let enforcer = Arc::new(LengthConstraintEnforcer::new(driver, WordRange::default()));
//! let store = Arc::new(InMemorySessionStore::new());
//!
//! let writer = ScriptWriter::new(prompts, enforcer, store, SessionIdGenerator::default());
//! let written = writer.write("the history of tea").await?;
//! assert_eq!(*written.result().word_count(), 200);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod corpus;
mod enforcer;
mod prompt;
mod refine;
mod session;
mod writer;

pub use corpus::{EXAMPLE_SEPARATOR, ExampleCorpus};
pub use enforcer::LengthConstraintEnforcer;
pub use prompt::PromptBuilder;
pub use refine::{DEFAULT_REFINE_ATTEMPTS, RefinementController};
pub use session::{InMemorySessionStore, SessionIdGenerator, SessionIdStrategy};
pub use writer::{ScriptWriter, WrittenScript};
