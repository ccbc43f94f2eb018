// src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use home_brain::{
    api::StatusApi,
    config,
    health::HttpProber,
    server::{RequestHandler, ServerBuilder},
    services::ServiceRegistry,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("home_brain=debug".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());

    info!("Loading configuration from: {}", config_path);
    let config = config::load_config(&config_path)?;

    let registry = ServiceRegistry::from_config(&config.services)?;
    for service in registry.iter() {
        info!(
            "Watching {} (probe {}, public {})",
            service.name, service.probe_url, service.public_url
        );
    }

    let prober = Arc::new(HttpProber::new(config.probe.timeout())?);
    let api = Arc::new(StatusApi::new(registry, prober, config.app.version.clone()));
    let handler = RequestHandler::new(api);

    let addr = config.server.socket_addr()?;
    info!("HomeBrain backend {} starting on {}", config.app.version, addr);

    // A bind failure ends the process with a non-zero exit.
    ServerBuilder::new(addr)
        .with_handler(handler)
        .serve()
        .await?;

    info!("HomeBrain backend stopped");
    Ok(())
}
