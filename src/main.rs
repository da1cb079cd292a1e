use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod tts;

use api::routes::{create_router, AppState};
use config::Config;
use tts::voice::{ALLOWED_VOICES, SUPPORTED_FORMAT};
use tts::{KokoroCli, TtsService};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config::ensure_temp_dir(&config.temp_dir) {
        tracing::error!("Failed to create or access temp directory: {}", e);
        std::process::exit(1);
    }

    let kokoro = KokoroCli::new(config.kokoro_bin.clone(), config.synthesis_timeout);
    if let Err(e) = kokoro.probe().await {
        tracing::error!("Failed to verify kokoro installation: {}", e);
        std::process::exit(1);
    }

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid address {}:{}: {}", config.host, config.port, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Kokoro TTS Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Available voices: {}", ALLOWED_VOICES.join(", "));
    tracing::info!("Using temp directory: {}", config.temp_dir.display());
    tracing::info!("Supported format: {}", SUPPORTED_FORMAT.to_uppercase());
    tracing::info!("Starting server on http://{}", addr);

    let tts = TtsService::new(Arc::new(kokoro), &config);
    let state = Arc::new(AppState { config, tts });
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
