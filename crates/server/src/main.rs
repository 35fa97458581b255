//! HTTP entry point.

use anyhow::Result;
use server::{create_router, AppState, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server=debug,recommender=debug,catalog=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config)?;

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
