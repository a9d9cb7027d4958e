use anyhow::Context;
use clap::Parser;
use climate_api::{init_logging, ClimateStore, HttpServer, ServerConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(config.log_format, config.debug)?;

    // The dataset must load before the server accepts requests.
    let store = ClimateStore::open()
        .measurements(config.measurements.clone())
        .stations(config.stations.clone())
        .maybe_cache_dir(config.cache_dir.clone())
        .call()
        .await
        .context("failed to load climate dataset")?;

    HttpServer::new(config.socket_addr(), Arc::new(store))
        .start()
        .await
        .with_context(|| format!("server on {} failed", config.socket_addr()))?;

    Ok(())
}
