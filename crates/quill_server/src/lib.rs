//! HTTP service for Quill.
//!
//! Wires configuration, logging, the Groq driver and the generation pipeline
//! into an axum router exposing `/`, `/chat` and `/refine`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod server;
mod telemetry;

pub use api::{
    ApiError, AppState, ChatRequest, ChatResponse, RefineRequest, RefineResponse,
    SESSION_NOT_FOUND_DETAIL, create_router,
};
pub use config::{
    API_KEY_VAR, LoggingConfig, ProviderConfig, QuillConfig, ScriptConfig, ServerConfig,
    api_key_from_env,
};
pub use server::serve;
pub use telemetry::init_logging;
