use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use chat_relay::config::RelayConfig;
use chat_relay::routes::create_router;
use chat_relay::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = RelayConfig::from_env().context("invalid relay configuration")?;
    let bind_addr = config.bind_addr.clone();
    let static_dir = config.static_dir.clone();

    if config.is_live() {
        info!(model = %config.model, timeout = ?config.upstream_timeout, "chat relay in live mode");
    } else {
        warn!("OPENAI_API_KEY not set, chat relay will send the static reply");
    }

    let state = Arc::new(AppState::from_config(config).context("failed to build upstream client")?);

    let app = create_router(&static_dir).with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    info!("chat relay listening on http://{bind_addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
