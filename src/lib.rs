pub mod agent;
pub mod commands;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod lookup;
pub mod types;

use log::{debug, info};
use tokio::io::{BufReader, stdin, stdout};

use agent::{ConsoleEnvironment, run_session};
use config::Config;
use error::Result;
use handler::MessageHandler;

/// Run the agent against the terminal until the user leaves.
pub async fn run() -> Result<()> {
    info!("Initializing agent");
    let config = Config::from_env()?;

    debug!("Building HTTP client");
    let handler = MessageHandler::from_config(&config)?;
    info!("Agent ready, answering '{}' commands", handler.variant());

    let mut env = ConsoleEnvironment::new(BufReader::new(stdin()), stdout());

    tokio::select! {
        result = run_session(&mut env, &handler) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down...");
        }
    }

    Ok(())
}
