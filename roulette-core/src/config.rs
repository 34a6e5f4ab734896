use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_CONTRACT_NAME: &str = "near-roulette.testnet";
pub const DEFAULT_APP_NAME: &str = "NEAR Roulette";
pub const DEFAULT_GAS: u64 = 3_000_000_000_000; // 3 Tgas

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Development,
    Betanet,
    Local,
    Test,
}

impl FromStr for Environment {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "production" | "mainnet" => Ok(Environment::Production),
            "development" | "testnet" => Ok(Environment::Development),
            "betanet" => Ok(Environment::Betanet),
            "local" => Ok(Environment::Local),
            "test" | "ci" => Ok(Environment::Test),
            _ => Err(GatewayError::config(format!(
                "Invalid environment: {}. Supported: production, development, betanet, local, test",
                s
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Production => "production",
            Environment::Development => "development",
            Environment::Betanet => "betanet",
            Environment::Local => "local",
            Environment::Test => "test",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network_id: String,
    pub node_url: String,
    pub contract_name: String,
    pub wallet_url: String,
    pub helper_url: String,
    pub explorer_url: String,
}

impl NetworkConfig {
    pub fn for_environment(env: Environment, contract_name: &str) -> Self {
        let contract_name = contract_name.to_string();
        match env {
            Environment::Production => Self {
                network_id: "mainnet".to_string(),
                node_url: "https://rpc.mainnet.near.org".to_string(),
                contract_name,
                wallet_url: "https://wallet.near.org".to_string(),
                helper_url: "https://helper.mainnet.near.org".to_string(),
                explorer_url: "https://explorer.mainnet.near.org".to_string(),
            },
            Environment::Development => Self {
                network_id: "testnet".to_string(),
                node_url: "https://rpc.testnet.near.org".to_string(),
                contract_name,
                wallet_url: "https://wallet.testnet.near.org".to_string(),
                helper_url: "https://helper.testnet.near.org".to_string(),
                explorer_url: "https://explorer.testnet.near.org".to_string(),
            },
            Environment::Betanet => Self {
                network_id: "betanet".to_string(),
                node_url: "https://rpc.betanet.near.org".to_string(),
                contract_name,
                wallet_url: "https://wallet.betanet.near.org".to_string(),
                helper_url: "https://helper.betanet.near.org".to_string(),
                explorer_url: "https://explorer.betanet.near.org".to_string(),
            },
            Environment::Local => Self {
                network_id: "local".to_string(),
                node_url: "http://localhost:3030".to_string(),
                contract_name,
                wallet_url: "http://localhost:4000/wallet".to_string(),
                helper_url: "http://localhost:3000".to_string(),
                explorer_url: "http://localhost:9001".to_string(),
            },
            Environment::Test => Self {
                network_id: "shared-test".to_string(),
                node_url: "https://rpc.ci-testnet.near.org".to_string(),
                contract_name,
                wallet_url: "https://wallet.ci-testnet.near.org".to_string(),
                helper_url: "https://helper.ci-testnet.near.org".to_string(),
                explorer_url: "https://explorer.ci-testnet.near.org".to_string(),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.network_id.is_empty() {
            return Err(GatewayError::config("Network ID cannot be empty"));
        }

        if self.contract_name.is_empty() {
            return Err(GatewayError::config("Contract name cannot be empty"));
        }

        for (name, url) in [
            ("Node URL", &self.node_url),
            ("Wallet URL", &self.wallet_url),
            ("Helper URL", &self.helper_url),
            ("Explorer URL", &self.explorer_url),
        ] {
            if url.is_empty() {
                return Err(GatewayError::config(format!("{} cannot be empty", name)));
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(GatewayError::config(format!(
                    "{} must be an http(s) URL: {}",
                    name, url
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub environment: Environment,
    pub network: NetworkConfig,
    pub app_name: String,
    pub gas: u64,
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(Environment::Development)
    }
}

impl GatewayConfig {
    pub fn new(environment: Environment) -> Self {
        Self::with_contract(environment, DEFAULT_CONTRACT_NAME)
    }

    pub fn with_contract(environment: Environment, contract_name: &str) -> Self {
        Self {
            environment,
            network: NetworkConfig::for_environment(environment, contract_name),
            app_name: DEFAULT_APP_NAME.to_string(),
            gas: DEFAULT_GAS,
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn contract_name(&self) -> &str {
        &self.network.contract_name
    }

    pub fn validate(&self) -> Result<()> {
        self.network.validate()?;

        if self.app_name.is_empty() {
            return Err(GatewayError::config("App name cannot be empty"));
        }

        if self.gas == 0 {
            return Err(GatewayError::config("Gas must be greater than 0"));
        }

        if self.request_timeout.is_zero() {
            return Err(GatewayError::config("Request timeout must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_aliases() {
        assert_eq!("mainnet".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Testnet".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("ci".parse::<Environment>().unwrap(), Environment::Test);
        assert!("moonnet".parse::<Environment>().is_err());
    }

    #[test]
    fn test_presets_validate() {
        for env in [
            Environment::Production,
            Environment::Development,
            Environment::Betanet,
            Environment::Local,
            Environment::Test,
        ] {
            let config = GatewayConfig::with_contract(env, "roulette.testnet");
            config.validate().unwrap();
            assert_eq!(config.contract_name(), "roulette.testnet");
        }
    }

    #[test]
    fn test_development_preset() {
        let config = GatewayConfig::default();
        assert_eq!(config.network.network_id, "testnet");
        assert_eq!(config.network.node_url, "https://rpc.testnet.near.org");
        assert_eq!(config.gas, DEFAULT_GAS);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GatewayConfig::default();
        config.network.contract_name.clear();
        assert!(config.validate().is_err());

        let mut config = GatewayConfig::default();
        config.network.node_url = "ftp://node".to_string();
        assert!(config.validate().is_err());

        let mut config = GatewayConfig::default();
        config.gas = 0;
        assert!(config.validate().is_err());
    }
}
