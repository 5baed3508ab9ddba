//! HTTP server for the Attendance Engine.
//!
//! Configuration is read from the environment:
//!
//! - `ATTENDANCE_CONFIG_DIR`: directory holding `policy.yaml` and
//!   `employees.yaml` (default `./config/default`)
//! - `ATTENDANCE_BIND_ADDR`: listen address (default `127.0.0.1:3000`)
//! - `RUST_LOG`: log filter (default `info`)

use std::env;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config_dir = env::var("ATTENDANCE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr = env::var("ATTENDANCE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        employees = config.employees().len(),
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Attendance engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
