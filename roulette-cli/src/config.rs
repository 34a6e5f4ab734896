use roulette_core::config::DEFAULT_CONTRACT_NAME;
use roulette_core::{Environment, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

/// Defaults remembered between runs; flags and env vars override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    pub environment: Environment,
    pub contract_name: String,
    #[serde(default)]
    pub node_url: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            contract_name: DEFAULT_CONTRACT_NAME.to_string(),
            node_url: None,
        }
    }
}

impl CliConfig {
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roulette")
    }

    /// Missing file means defaults.
    pub async fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, data_dir: &Path) -> Result<()> {
        tokio::fs::create_dir_all(data_dir).await?;
        let json = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(data_dir.join(CONFIG_FILE), json).await?;
        Ok(())
    }
}
