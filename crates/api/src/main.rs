use anyhow::{Context, Result};
use api::{AppConfig, AppState, logging, router};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // Initialize tracing
    logging::init_tracing(&config.logging)?;

    let state = Arc::new(AppState::new(&config));
    let app = router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(
        cache = config.cache.enabled,
        other_spans = ?config.builder.other_spans,
        "Server listening on http://{}",
        addr
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
