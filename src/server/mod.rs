//! HTTP surface: router construction and the serve loop.

mod handlers;

pub use handlers::{AppState, ErrorResponse};

use crate::config::ServerConfig;
use crate::recognizer::{RecognitionConfig, Recognizer};
use crate::Result;
use axum::routing::post;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

/// Build the application router: the transcription endpoint plus the static
/// UI as the fallback.
pub fn router(recognizer: Arc<dyn Recognizer>, static_dir: &Path) -> Router {
    let state = Arc::new(AppState {
        recognizer,
        config: RecognitionConfig::default(),
    });

    // permissive CORS, the UI may be opened from another origin on the LAN
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/transcribe-audio", post(handlers::transcribe_audio))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .with_state(state)
}

/// Bind and run the server until it is shut down externally.
pub async fn serve(config: &ServerConfig, recognizer: Arc<dyn Recognizer>) -> Result<()> {
    let app = router(recognizer, &config.static_dir);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("speakscore listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
