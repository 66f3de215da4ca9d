//! Main entry point for the Aula backend CLI.

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use server::server as runtime;
use shared::config::server::Config;
use std::error::Error;
use std::path::PathBuf;

/// Main CLI structure for the Aula server
#[derive(Parser)]
#[command(name = "Aula CLI")]
#[command(about = "Backend server for the Aula classroom platform", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands for the Aula CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Start the backend server
    Serve {
        /// The port number to bind the server to (e.g., 8080)
        #[arg(long, short)]
        port: Option<u16>,

        /// Path to the configuration file (config.yaml or config.json)
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}

async fn handle_serve_command(
    port: Option<u16>,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let resolved = Config::load_config(config, port)?;
    runtime::run(resolved).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, config } => handle_serve_command(port, config).await,
    }
}
