//! Portfolio Manager API Server
//!
//! HTTP API exposing the decision stage and the report formatter,
//! plus health and metrics endpoints. Stateless between requests.

use dotenvy::dotenv;
use portfolio_manager::config::{self, ManagerConfig};
use portfolio_manager::core::http::start_server;
use portfolio_manager::logging;
use std::env;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let manager_config = ManagerConfig::from_env()?;

    info!("Starting Portfolio Manager API Server");
    info!(environment = %config::get_environment(), "Environment");
    info!(policy = ?manager_config.policy, model = %manager_config.model, "Decision stage");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, manager_config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
