use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::config::Config;
use crate::tts::TtsService;

pub struct AppState {
    pub config: Config,
    pub tts: TtsService,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        )
        .route(
            "/voices",
            get(handlers::list_voices).fallback(handlers::method_not_allowed),
        )
        .route(
            "/synthesize",
            post(handlers::synthesize).fallback(handlers::method_not_allowed),
        )
        .route(
            "/synthesize/stream",
            post(handlers::synthesize_stream).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
