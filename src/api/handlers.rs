use std::any::Any;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::{IntoResponse, Response},
    Json,
};

use super::{audio, validate, HealthResponse, VoicesResponse};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::tts::voice::{VoiceCatalog, SUPPORTED_FORMAT};

pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = body?;
    let request = validate::validate(
        validate::parse_body(&body)?,
        state.config.max_text_length,
    )?;

    let artifact = state.tts.synthesize(request.text, request.voice).await?;
    audio::attachment(artifact).await
}

pub async fn synthesize_stream(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = body?;
    let request = validate::validate(
        validate::parse_body(&body)?,
        state.config.max_text_length,
    )?;

    let artifact = state.tts.synthesize(request.text, request.voice).await?;
    audio::inline(artifact).await
}

pub async fn list_voices() -> Json<VoicesResponse> {
    let catalog = VoiceCatalog::builtin();
    Json(VoicesResponse {
        voices: catalog.voices,
        default: catalog.default,
        supported_format: SUPPORTED_FORMAT,
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "Kokoro TTS API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        supported_format: SUPPORTED_FORMAT.to_string(),
    })
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Turn a handler panic into the generic 500 body.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}
