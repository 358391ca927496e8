//! HTTP boundary of the ActionTab predictor
//!
//! `POST /predict` takes a base64 screenshot, the cursor and recent history and
//! answers with one predicted action; `GET /health` reports whether a model is
//! loaded or mock predictions are being served.

pub mod api;
pub mod config;
pub mod logging;
pub mod types;

use actiontab::ActionPredictor;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;

/// Shared router state: the predictor is immutable after startup.
pub type AppState = Arc<ActionPredictor>;

pub fn build_router(predictor: AppState, config: &ServerConfig) -> Router {
    let mut app = Router::new()
        .route("/health", get(api::health))
        .route("/predict", post(api::predict))
        .layer(DefaultBodyLimit::max(config.max_body_bytes()))
        .layer(TraceLayer::new_for_http())
        .with_state(predictor);

    if !config.no_cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app
}
