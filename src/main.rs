use anyhow::Result;
use codecoach_graph::api::HttpServer;
use codecoach_graph::graph::{self, HttpGraphClient};
use codecoach_graph::{Config, Pipeline};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("serve");

    match command {
        "check" => run_check().await?,
        "serve" => run_http_server().await?,
        other => anyhow::bail!("Unknown command '{}'. Expected 'serve' or 'check'.", other),
    }

    Ok(())
}

/// Serve the ingest/update/query routes
async fn run_http_server() -> Result<()> {
    log::info!("Starting codecoach-graph v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    log::info!("Cache directory: {}", config.cache_dir().display());

    let pipeline = Arc::new(Pipeline::from_config(&config)?);
    let server = HttpServer::new(pipeline, &config.github.default_path);
    server.run(&config.bind_addr()).await?;

    Ok(())
}

/// Load configuration and open one graph connection
async fn run_check() -> Result<()> {
    log::info!("Checking codecoach-graph v{} configuration", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    log::info!("Configuration loaded successfully");
    log::info!("Code host API: {}", config.github.api_url);
    log::info!("Cache directory: {}", config.cache_dir().display());

    let credentials = config.credentials()?;
    let client = HttpGraphClient::from_credentials(&credentials)?;
    graph::with_session(&client, |_session| Box::pin(async { Ok(()) })).await?;

    log::info!("✓ Graph store reachable at {}", client.redacted_base());
    Ok(())
}
