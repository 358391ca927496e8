use actiontab::ActionPredictor;
use actiontab_server::{build_router, logging::init_logging, ServerConfig};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let config = ServerConfig::parse();

    init_logging()?;

    info!("🚀 Starting actiontab-server v{}", env!("CARGO_PKG_VERSION"));
    info!("🔧 Bind: {}", config.bind_addr());
    info!("🔧 CORS: {}", if config.no_cors { "disabled" } else { "enabled" });

    let predictor = Arc::new(ActionPredictor::connect(config.resolved_model(), &config.ollama()).await);
    info!("✅ Predictor ready (mock mode: {})", predictor.is_mock());

    let app = build_router(predictor, &config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("✅ Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("ActionTab server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
