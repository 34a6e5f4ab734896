use crate::config::CliConfig;
use clap::Subcommand;
use roulette_core::{Environment, GatewayConfig, Result};
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the stored defaults and the network they resolve to
    Show,
    /// Change the stored defaults
    Set {
        /// Environment (production, development, betanet, local, test)
        #[arg(short, long)]
        env: Option<Environment>,
        /// Contract account
        #[arg(short, long)]
        contract: Option<String>,
        /// Node RPC URL override
        #[arg(short, long)]
        node_url: Option<String>,
    },
    /// Restore the defaults
    Reset,
}

pub async fn handle_config_command(cmd: ConfigCommands, data_dir: &Path) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = CliConfig::load(data_dir).await?;
            let gateway = GatewayConfig::with_contract(config.environment, &config.contract_name);

            println!("Environment: {}", config.environment);
            println!("Contract: {}", config.contract_name);
            println!(
                "Node: {}",
                config.node_url.as_deref().unwrap_or(&gateway.network.node_url)
            );
            println!("Wallet: {}", gateway.network.wallet_url);
            println!("Explorer: {}", gateway.network.explorer_url);
            println!("Data dir: {}", data_dir.display());
        }

        ConfigCommands::Set {
            env,
            contract,
            node_url,
        } => {
            let mut config = CliConfig::load(data_dir).await?;
            if let Some(env) = env {
                config.environment = env;
            }
            if let Some(contract) = contract {
                config.contract_name = contract;
            }
            if let Some(node_url) = node_url {
                config.node_url = Some(node_url);
            }

            // reject values the gateway would refuse later
            let mut resolved =
                GatewayConfig::with_contract(config.environment, &config.contract_name);
            if let Some(node_url) = &config.node_url {
                resolved.network.node_url = node_url.clone();
            }
            resolved.validate()?;

            config.save(data_dir).await?;
            tracing::info!(
                "Stored defaults: {} / {}",
                config.environment,
                config.contract_name
            );
            println!("Saved defaults to {}", data_dir.display());
        }

        ConfigCommands::Reset => {
            CliConfig::default().save(data_dir).await?;
            tracing::info!("Stored defaults reset");
            println!("Defaults restored.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_set_then_reset_defaults() {
        let temp_dir = tempdir().unwrap();

        handle_config_command(
            ConfigCommands::Set {
                env: Some(Environment::Production),
                contract: Some("roulette.near".to_string()),
                node_url: None,
            },
            temp_dir.path(),
        )
        .await
        .unwrap();

        let stored = CliConfig::load(temp_dir.path()).await.unwrap();
        assert_eq!(stored.environment, Environment::Production);
        assert_eq!(stored.contract_name, "roulette.near");

        handle_config_command(ConfigCommands::Reset, temp_dir.path())
            .await
            .unwrap();
        assert_eq!(
            CliConfig::load(temp_dir.path()).await.unwrap(),
            CliConfig::default()
        );
    }

    #[tokio::test]
    async fn test_set_rejects_bad_node_url() {
        let temp_dir = tempdir().unwrap();

        let result = handle_config_command(
            ConfigCommands::Set {
                env: None,
                contract: None,
                node_url: Some("ftp://node".to_string()),
            },
            temp_dir.path(),
        )
        .await;

        assert!(result.is_err());
        assert!(!temp_dir.path().join("config.json").exists());
    }
}
