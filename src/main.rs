//! Duty Compliance HTTP Server Binary
//!
//! Loads the compliance policy, installs the tracing subscriber and serves
//! the `/compliance/*` endpoints.
//!
//! # Environment Variables
//!
//! - `DUTY_COMPLIANCE_CONFIG`: Policy directory (default: ./config/default)
//! - `DUTY_COMPLIANCE_ADDR`: Bind address (default: 0.0.0.0:3000)
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use duty_compliance::api::{AppState, create_router};
use duty_compliance::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config_dir =
        env::var("DUTY_COMPLIANCE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    info!(config_dir = %config_dir, "Compliance policy loaded");

    let app = create_router(AppState::new(config));

    let addr: SocketAddr = env::var("DUTY_COMPLIANCE_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
