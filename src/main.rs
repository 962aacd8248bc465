//! Wholesale Catalog - backend with a Google Sheets database

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wholesale_catalog::{api, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let state = AppState::connect(&config)?;
    let app = api::router(state, &config.allowed_origins);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("🚀 Wholesale catalog backend listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(&addr).await?, app).await?;
    Ok(())
}
