use std::env;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use paperlens_server::{build_router, AppConfig, AppState};
use paperlens_storage::mongo::{MongoCache, MongoConnector};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = AppConfig::from_env()?;

    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let report = config.validate();
    if !report.is_ok() {
        error!(
            missing = ?report.missing_required,
            env = config.env.as_str(),
            "environment validation failed"
        );
        if !config.env.is_production() {
            return Err(eyre::eyre!(
                "missing required environment variables: {}",
                report.missing_required.join(", ")
            ));
        }
    }

    let cache = Arc::new(MongoCache::new(MongoConnector::new(
        config.mongo_url.clone().unwrap_or_default(),
    )));
    let state = AppState::from_config(&config, cache.clone())?;
    let app = build_router(state);

    if env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        info!("starting Lambda runtime");
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    // Locally, fail fast if the database is unreachable.
    cache.get().await?;

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, "server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
