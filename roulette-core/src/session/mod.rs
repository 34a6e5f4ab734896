pub mod local;
pub mod storage;
pub mod store;

pub use local::LocalSession;
pub use storage::Storage;
pub use store::{SessionData, SessionStore};

use crate::config::NetworkConfig;
use crate::error::Result;
use crate::types::SignInRequest;
use async_trait::async_trait;

/// Who is signed in. The gateway only reads this; the provider owns it.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Bind to a network and restore any existing session for it.
    async fn connect(&self, network: &NetworkConfig) -> Result<()>;

    fn is_signed_in(&self) -> bool;

    /// Start a sign-in. Control continues outside the process (wallet page).
    async fn request_sign_in(&self, contract_id: &str, display_name: &str)
        -> Result<SignInRequest>;

    async fn sign_out(&self) -> Result<()>;

    fn account_id(&self) -> Option<String>;
}

/// Account ids are 2..=64 chars of `[a-z0-9]` runs joined by single `-`, `_` or `.`.
pub fn is_valid_account_id(account_id: &str) -> bool {
    if account_id.len() < 2 || account_id.len() > 64 {
        return false;
    }

    let mut last_was_separator = true;
    for c in account_id.chars() {
        match c {
            'a'..='z' | '0'..='9' => last_was_separator = false,
            '-' | '_' | '.' => {
                if last_was_separator {
                    return false;
                }
                last_was_separator = true;
            }
            _ => return false,
        }
    }

    !last_was_separator
}
