use crate::config::NetworkConfig;
use crate::error::{GatewayError, Result};
use crate::session::{is_valid_account_id, SessionData, SessionProvider, SessionStore, Storage};
use crate::types::SignInRequest;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use reqwest::Url;
use std::path::Path;
use std::sync::Arc;

#[derive(Default)]
struct SessionState {
    network: Option<NetworkConfig>,
    session: Option<SessionData>,
}

/// Session provider that keeps the signed-in account in a local sqlite file,
/// one row per (network, contract).
pub struct LocalSession {
    storage: Arc<Storage>,
    state: RwLock<SessionState>,
}

impl LocalSession {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self {
            storage,
            state: RwLock::new(SessionState::default()),
        }
    }

    pub async fn open(data_dir: &Path) -> Result<Self> {
        let db_path = data_dir.join("sessions.db");
        let storage = Arc::new(Storage::new(&db_path).await?);
        Ok(Self::new(storage))
    }

    fn network(&self) -> Result<NetworkConfig> {
        self.state
            .read()
            .network
            .clone()
            .ok_or_else(|| GatewayError::connection("session provider is not connected"))
    }

    /// Record the account the wallet signed in with. This is the second half
    /// of [`SessionProvider::request_sign_in`].
    pub async fn complete_sign_in(&self, account_id: &str) -> Result<SessionData> {
        if !is_valid_account_id(account_id) {
            return Err(GatewayError::invalid_input(format!(
                "Invalid account id: {}",
                account_id
            )));
        }

        let network = self.network()?;
        let session = SessionData {
            network_id: network.network_id.clone(),
            contract_id: network.contract_name.clone(),
            account_id: account_id.to_string(),
            created_at: Utc::now(),
        };

        SessionStore::new(&self.storage).save_session(&session).await?;
        self.state.write().session = Some(session.clone());

        tracing::info!(
            "Signed in as '{}' on {}",
            session.account_id,
            session.network_id
        );
        Ok(session)
    }

    pub fn session(&self) -> Option<SessionData> {
        self.state.read().session.clone()
    }

    /// Every stored sign-in, across networks and contracts, newest first.
    pub async fn saved_sessions(&self) -> Result<Vec<SessionData>> {
        SessionStore::new(&self.storage).list_sessions().await
    }
}

#[async_trait]
impl SessionProvider for LocalSession {
    async fn connect(&self, network: &NetworkConfig) -> Result<()> {
        network.validate()?;

        let restored = SessionStore::new(&self.storage)
            .load_session(&network.network_id, &network.contract_name)
            .await
            .map_err(|e| GatewayError::connection(format!("Failed to read session: {}", e)))?;

        if let Some(session) = &restored {
            tracing::debug!("Restored session for '{}'", session.account_id);
        }

        let mut state = self.state.write();
        state.network = Some(network.clone());
        state.session = restored;
        Ok(())
    }

    fn is_signed_in(&self) -> bool {
        self.state.read().session.is_some()
    }

    async fn request_sign_in(
        &self,
        contract_id: &str,
        display_name: &str,
    ) -> Result<SignInRequest> {
        let network = self.network()?;
        let login = format!("{}/login/", network.wallet_url.trim_end_matches('/'));
        let redirect_url = Url::parse_with_params(
            &login,
            &[("title", display_name), ("contract_id", contract_id)],
        )
        .map_err(|e| GatewayError::config(format!("Invalid wallet URL: {}", e)))?;

        Ok(SignInRequest {
            contract_id: contract_id.to_string(),
            display_name: display_name.to_string(),
            redirect_url: redirect_url.to_string(),
        })
    }

    async fn sign_out(&self) -> Result<()> {
        let network = self.network()?;
        SessionStore::new(&self.storage)
            .delete_session(&network.network_id, &network.contract_name)
            .await?;

        if let Some(session) = self.state.write().session.take() {
            tracing::info!("Signed out '{}'", session.account_id);
        }
        Ok(())
    }

    fn account_id(&self) -> Option<String> {
        self.state
            .read()
            .session
            .as_ref()
            .map(|s| s.account_id.clone())
    }
}
