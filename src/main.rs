use anyhow::Context;
use focus_stream::api::{build_router, AppState};
use focus_stream::{logging, Config, GeminiOracle, Oracle};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load().context("loading configuration")?;
    logging::init(&config.logging)?;

    let oracle: Arc<dyn Oracle> =
        Arc::new(GeminiOracle::new(config.oracle.clone()).context("building oracle client")?);
    info!(model = %config.oracle.model, "Oracle client ready");

    let state = AppState::new(oracle, &config.discovery, &config.session);
    let app = build_router(state, config.server.max_body_bytes);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("FocusStream listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("FocusStream stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
