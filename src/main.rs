//! Portfolio Manager CLI
//!
//! Runs one decision cycle over an agent state read from a JSON file (or stdin)
//! and prints the appended decision message.
//!
//! Usage: `portfolio-manager [STATE_FILE] [--report]`

use dotenvy::dotenv;
use portfolio_manager::config::ManagerConfig;
use portfolio_manager::logging;
use portfolio_manager::models::AgentState;
use portfolio_manager::signals::engine::DECISION_MESSAGE_NAME;
use portfolio_manager::signals::{validation, FormattedDecision, PortfolioManager};
use std::env;
use std::io::Read;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let with_report = args.iter().any(|a| a == "--report");
    let path = args.iter().find(|a| !a.starts_with("--"));

    let raw = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let state: AgentState = serde_json::from_str(&raw)?;

    let config = ManagerConfig::from_env()?;
    let manager = PortfolioManager::from_config(&config)?;

    let (state, source) = manager.run_with_outcome(state).await?;
    info!(source = source.as_str(), "decision cycle complete");

    let message = state
        .last_message(DECISION_MESSAGE_NAME)
        .ok_or("decision message missing from state")?;
    println!("{}", message.content);

    if with_report {
        match validation::parse_decision(&message.content) {
            Ok(decision) => println!("{}", FormattedDecision::from_decision(&decision).report),
            Err(e) => warn!(error = %e, "decision is not structured JSON, skipping report"),
        }
    }

    Ok(())
}
