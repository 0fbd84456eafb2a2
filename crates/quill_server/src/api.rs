//! HTTP API for generating and refining scripts.

use crate::ScriptConfig;
use axum::{
    Router,
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use quill_error::{ConfigError, QuillError, QuillResult};
use quill_interface::{QuillDriver, SessionStore};
use quill_script::{
    ExampleCorpus, LengthConstraintEnforcer, PromptBuilder, RefinementController, ScriptWriter,
    SessionIdGenerator,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

/// Detail returned when a refinement names an unknown session.
pub const SESSION_NOT_FOUND_DETAIL: &str = "Previous script not found. Start a new session.";

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatRequest {
    /// Topic of the script
    pub user_query: String,
}

/// Reply to `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatResponse {
    /// Generated script
    pub response: String,
    /// Session to pass to `/refine`
    pub session_id: String,
    /// Words in `response`
    pub word_count: usize,
    /// Whether `word_count` is inside the target range
    pub within_target: bool,
}

/// Body of `POST /refine`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RefineRequest {
    /// Requested changes
    pub user_refinement: String,
    /// Session returned by `/chat`
    pub session_id: String,
}

/// Reply to `POST /refine`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RefineResponse {
    /// Refined script
    pub response: String,
    /// Words in `response`
    pub word_count: usize,
    /// Whether `word_count` is inside the target range
    pub within_target: bool,
}

/// Handler failure rendered as `{"detail": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: SESSION_NOT_FOUND_DETAIL.to_string(),
        }
    }

    fn internal(context: &str, error: &QuillError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: format!("{}: {}", context, error),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    writer: Arc<ScriptWriter>,
    refiner: Arc<RefinementController>,
}

impl AppState {
    /// Create state from an already assembled writer and refiner.
    pub fn new(writer: Arc<ScriptWriter>, refiner: Arc<RefinementController>) -> Self {
        Self { writer, refiner }
    }

    /// Assemble the generation pipeline around a driver, corpus and store.
    pub fn assemble(
        driver: Arc<dyn QuillDriver>,
        corpus: ExampleCorpus,
        store: Arc<dyn SessionStore>,
        config: &ScriptConfig,
    ) -> Self {
        let range = config.word_range();
        let prompts = Arc::new(PromptBuilder::new(
            Arc::new(corpus),
            config.few_shot_examples,
            range,
        ));
        let enforcer = Arc::new(LengthConstraintEnforcer::new(driver, range));

        let writer = ScriptWriter::new(
            prompts.clone(),
            enforcer.clone(),
            store.clone(),
            SessionIdGenerator::new(config.session_ids),
        );
        let refiner = RefinementController::new(prompts, enforcer, store)
            .with_max_attempts(config.refine_attempts);

        Self::new(Arc::new(writer), Arc::new(refiner))
    }
}

/// Build the API router with CORS restricted to `allowed_origin`.
///
/// # Errors
///
/// Returns a configuration error if `allowed_origin` is not a valid header value.
pub fn create_router(state: AppState, allowed_origin: &str) -> QuillResult<Router> {
    let origin = HeaderValue::from_str(allowed_origin).map_err(|e| {
        ConfigError::new(format!("Invalid allowed origin {:?}: {}", allowed_origin, e))
    })?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Ok(Router::new()
        .route("/", get(root))
        .route("/chat", post(chat))
        .route("/refine", post(refine))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Liveness greeting.
async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Hello, world!" }))
}

/// Generate a new script and open a session for it.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let written = state.writer.write(&request.user_query).await.map_err(|e| {
        error!(error = %e, "Script generation failed");
        ApiError::internal("Error processing request", &e)
    })?;

    let result = written.result();
    Ok(Json(ChatResponse {
        response: result.text().clone(),
        session_id: written.session_id().clone(),
        word_count: *result.word_count(),
        within_target: result.within_target(),
    }))
}

/// Refine the script stored for a session.
async fn refine(
    State(state): State<AppState>,
    Json(request): Json<RefineRequest>,
) -> Result<Json<RefineResponse>, ApiError> {
    let result = state
        .refiner
        .refine(&request.session_id, &request.user_refinement)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                warn!(session_id = %request.session_id, "Refinement for unknown session");
                ApiError::not_found()
            } else {
                error!(error = %e, "Script refinement failed");
                ApiError::internal("Error processing refinement", &e)
            }
        })?;

    Ok(Json(RefineResponse {
        word_count: *result.word_count(),
        within_target: result.within_target(),
        response: result.into_text(),
    }))
}
