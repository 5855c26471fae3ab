//! Web server binary for the caredesk admin dashboard
#![forbid(unsafe_code)]

use caredesk_web::build_app;
use std::net::{IpAddr, SocketAddr};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Get configuration
    let (config, config_fallback) = match caredesk_core::Config::load() {
        Ok(config) => (config, None),
        Err(e) => (caredesk_core::Config::default(), Some(e)),
    };

    // Initialize tracing from the logging section
    caredesk_core::init_logging(&config.logging)?;
    if let Some(e) = config_fallback {
        warn!("Failed to load config: {e}, using defaults");
    }

    // Build the application with configuration
    let app = build_app(config.clone())?;

    let host: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| format!("Invalid server host '{}': {e}", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);

    info!("Starting caredesk admin dashboard on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
