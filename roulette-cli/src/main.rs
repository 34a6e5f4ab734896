mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::CliConfig;
use roulette_core::{Environment, GatewayConfig, GatewayError, LocalSession};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roulette")]
#[command(about = "NEAR roulette - contract client")]
#[command(version)]
struct Cli {
    /// Data directory for sessions and settings
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Environment (production, development, betanet, local, test)
    #[arg(short, long, global = true, env = "NODE_ENV")]
    env: Option<Environment>,

    /// Contract account
    #[arg(short, long, global = true, env = "CONTRACT_NAME")]
    contract: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign-in commands
    #[command(subcommand)]
    Session(commands::SessionCommands),

    /// Account, round and contract status
    #[command(subcommand)]
    Status(commands::StatusCommands),

    /// Bets, deposits, stakes and spins
    #[command(subcommand)]
    Play(commands::PlayCommands),

    /// Show what a transaction returned
    Result {
        /// Transaction hash
        hash: String,
    },

    /// Amount conversions
    #[command(subcommand)]
    Units(commands::UnitsCommands),

    /// Stored defaults
    #[command(subcommand)]
    Config(commands::ConfigCommands),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "roulette={0},roulette_core={0}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = cli.data_dir.unwrap_or_else(CliConfig::default_data_dir);

    let result = match cli.command {
        Commands::Units(cmd) => commands::handle_units_command(cmd),
        Commands::Config(cmd) => commands::handle_config_command(cmd, &data_dir).await,
        command => {
            tokio::fs::create_dir_all(&data_dir).await?;

            let stored = CliConfig::load(&data_dir).await?;
            let environment = cli.env.unwrap_or(stored.environment);
            let contract = cli.contract.unwrap_or(stored.contract_name);

            let mut config = GatewayConfig::with_contract(environment, &contract);
            if let Some(node_url) = stored.node_url {
                config.network.node_url = node_url;
            }

            match connect(config, &data_dir).await {
                Ok(ctx) => match command {
                    Commands::Session(cmd) => commands::handle_session_command(cmd, &ctx).await,
                    Commands::Status(cmd) => commands::handle_status_command(cmd, &ctx).await,
                    Commands::Play(cmd) => commands::handle_play_command(cmd, &ctx).await,
                    Commands::Result { hash } => commands::handle_result_command(hash, &ctx).await,
                    Commands::Units(_) | Commands::Config(_) => Ok(()),
                },
                Err(e) => Err(e),
            }
        }
    };

    if let Err(e) = result {
        match e {
            GatewayError::NotSignedIn(_) => {
                eprintln!("Error: Not signed in");
                eprintln!("Use 'roulette session login' to sign in");
            }
            GatewayError::Connection(msg) => {
                eprintln!("Error: Could not reach the contract: {}", msg);
            }
            GatewayError::Submission(msg) => {
                eprintln!("Error: Transaction was not submitted: {}", msg);
                if msg.contains("no transaction signer") {
                    eprintln!("Write commands need a wallet signer attached to the contract client");
                }
            }
            GatewayError::ResultUnavailable { hash } => {
                eprintln!("Error: Transaction {} has no final result yet", hash);
                eprintln!("Try again in a few seconds");
            }
            GatewayError::Rpc { name, message, .. } => {
                eprintln!("Error: Node rejected the request ({})", name);
                eprintln!("{}", message);
            }
            _ => {
                eprintln!("Error: {}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn connect(config: GatewayConfig, data_dir: &Path) -> roulette_core::Result<commands::Context> {
    let session = Arc::new(LocalSession::open(data_dir).await?);
    let gateway = roulette_core::connect(config, session.clone()).await?;
    Ok(commands::Context { gateway, session })
}
