//! Groq LPU inference API.

mod driver;

pub use driver::{GROQ_CHAT_COMPLETIONS_URL, GroqDriver};
