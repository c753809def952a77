//! HTTP request handlers

use crate::api::server::AppContext;
use crate::playback::PlaybackStatus;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    status: String,
}

/// Build information response
#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub version: String,
    pub git_hash: String,
    pub build_timestamp: String,
    pub build_profile: String,
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    text: String,
}

/// Normalized speech and the gloss labels queued for playback
#[derive(Debug, Serialize)]
pub struct TranslationResponse {
    speech: String,
    gloss: Vec<String>,
}

type ApiError = (StatusCode, Json<StatusResponse>);

fn api_error(code: StatusCode, message: impl Into<String>) -> ApiError {
    (
        code,
        Json(StatusResponse {
            status: message.into(),
        }),
    )
}

// ============================================================================
// Health Endpoints
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "signa-ap".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /build_info
pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        build_timestamp: env!("BUILD_TIMESTAMP").to_string(),
        build_profile: env!("BUILD_PROFILE").to_string(),
    })
}

// ============================================================================
// Translation Endpoints
// ============================================================================

/// GET /listen - Capture one utterance, translate it and queue it for playback
pub async fn listen(
    State(ctx): State<AppContext>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let Some(transcriber) = ctx.transcriber.clone() else {
        return Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "No transcriber configured",
        ));
    };

    let transcript = transcriber.transcribe().await.map_err(|e| {
        error!("Transcription failed: {}", e);
        api_error(StatusCode::BAD_GATEWAY, format!("error: {}", e))
    })?;

    translate_and_submit(&ctx, &transcript)
}

/// POST /translate - Translate supplied text and queue it for playback
pub async fn translate(
    State(ctx): State<AppContext>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<TranslationResponse>, ApiError> {
    translate_and_submit(&ctx, &req.text)
}

fn translate_and_submit(
    ctx: &AppContext,
    text: &str,
) -> Result<Json<TranslationResponse>, ApiError> {
    let translation = ctx.translator.translate(text);
    let gloss = translation.gloss_labels();

    match ctx.engine.submit(translation.speech.clone(), translation.gloss) {
        Ok(sequence_id) => {
            info!(%sequence_id, "Queued {:?} as {:?}", translation.speech, gloss);
            Ok(Json(TranslationResponse {
                speech: translation.speech,
                gloss,
            }))
        }
        Err(e) => {
            warn!("Failed to submit sequence: {}", e);
            Err(api_error(StatusCode::SERVICE_UNAVAILABLE, format!("error: {}", e)))
        }
    }
}

// ============================================================================
// Playback Endpoints
// ============================================================================

/// GET /playback/state - Current scheduler snapshot
pub async fn get_playback_state(State(ctx): State<AppContext>) -> Json<PlaybackStatus> {
    Json(ctx.engine.status().await)
}
