//! Work tracker HTTP server.
//!
//! Reads the seed configuration from `WORK_TRACKER_CONFIG`
//! (default `./config/tracker.yaml`) and listens on `WORK_TRACKER_ADDR`
//! (default `127.0.0.1:3000`). Log filtering follows `RUST_LOG`.

use std::env;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use work_tracker::api::{AppState, Workspace, create_router};
use work_tracker::config::ConfigLoader;
use work_tracker::tracker::RomeClock;

const DEFAULT_CONFIG_PATH: &str = "./config/tracker.yaml";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path =
        env::var("WORK_TRACKER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let addr = env::var("WORK_TRACKER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let loader = ConfigLoader::load(&config_path)?;
    let workspace = Workspace::from_config(&loader)?;
    let state = AppState::new(workspace, Arc::new(RomeClock));

    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    info!(%addr, config = %config_path, "Work tracker listening");
    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
