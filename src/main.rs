use anyhow::{Context, Result};
use linguaverse::config::Config;
use linguaverse::server::{self, AppState};
use linguaverse::store::LocalStore;
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("linguaverse=info".parse()?),
        )
        .init();

    let config = Config::from_env();

    if config.is_live() {
        info!("Provider credential found, running in AI mode");
    } else {
        info!("No provider credential, running in demo mode");
    }

    let store = LocalStore::open(&config.storage_dir)?;

    let host: std::net::IpAddr = config
        .host
        .parse()
        .context("HOST must be a valid IP address")?;
    let addr = SocketAddr::from((host, config.port));

    let app = server::router(AppState {
        config,
        client: reqwest::Client::new(),
        store,
    });

    info!("LinguaVerse server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
