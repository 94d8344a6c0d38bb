//! Text generation handler.

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use lovesnotes_core::{validate_prompt, GenerateRequest, GenerateResponse};

use crate::error::ApiError;
use crate::AppState;

/// Generate text from a prompt. The result is not stored.
///
/// POST /generate
#[utoipa::path(post, path = "/generate", tag = "Generation",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated text", body = GenerateResponse),
        (status = 400, description = "Empty prompt", body = MessageResponse),
        (status = 500, description = "Provider failure", body = MessageResponse)
    ))]
pub async fn generate_text(
    State(state): State<AppState>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = body?;
    validate_prompt(&request.prompt).map_err(ApiError::for_generation)?;

    let start = Instant::now();
    let generated_text = state
        .generator
        .generate(&request.prompt)
        .await
        .map_err(ApiError::for_generation)?;

    info!(
        subsystem = "api",
        component = "generate",
        model = state.generator.model_name(),
        prompt_len = request.prompt.len(),
        response_len = generated_text.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Text generated"
    );
    Ok(Json(GenerateResponse { generated_text }))
}
