//! Settlement Engine HTTP server.

use std::env;

use settlement_engine::api::{AppState, create_router};
use settlement_engine::config::ConfigLoader;
use settlement_engine::logging;
use tracing::info;

const DEFAULT_CONFIG_DIR: &str = "./config/clt";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config_dir =
        env::var("SETTLEMENT_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr =
        env::var("SETTLEMENT_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        code = %config.metadata().code,
        version = %config.metadata().version,
        rate_table_sets = config.config().schedule().sets().len(),
        "Loaded configuration"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(bind_addr = %bind_addr, "Settlement engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
