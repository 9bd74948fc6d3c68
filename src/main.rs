use fitfindr_api::api::{create_router, AppState};
use fitfindr_api::config::{Config, EngineConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let engine = EngineConfig::from_env()?;

    let state = AppState::from_config(&config, engine);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, data_dir = %config.data_dir, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
