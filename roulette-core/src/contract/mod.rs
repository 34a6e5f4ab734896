pub mod rpc;

pub use rpc::{RpcClient, RpcContract};

use crate::error::{GatewayError, Result};
use crate::types::TransactionHandle;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

pub const VIEW_METHODS: [&str; 3] = ["get_account_status", "get_round_status", "get_contract_status"];

pub const CHANGE_METHODS: [&str; 7] = [
    "bet",
    "deposit",
    "withdraw",
    "stake",
    "unstake",
    "harvest",
    "spin_wheel",
];

/// The read and write methods a contract binding exposes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContractMethods {
    pub view: BTreeSet<String>,
    pub change: BTreeSet<String>,
}

impl ContractMethods {
    pub fn new<V, C>(view: V, change: C) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            view: view.into_iter().map(Into::into).collect(),
            change: change.into_iter().map(Into::into).collect(),
        }
    }

    /// Everything the gateway calls on the roulette contract.
    pub fn roulette() -> Self {
        Self::new(VIEW_METHODS, CHANGE_METHODS)
    }

    pub fn is_view(&self, method: &str) -> bool {
        self.view.contains(method)
    }

    pub fn is_change(&self, method: &str) -> bool {
        self.change.contains(method)
    }

    pub fn missing(&self, required: &ContractMethods) -> Vec<String> {
        let views = required
            .view
            .difference(&self.view)
            .map(|m| format!("view:{}", m));
        let changes = required
            .change
            .difference(&self.change)
            .map(|m| format!("change:{}", m));
        views.chain(changes).collect()
    }

    pub fn require(&self, required: &ContractMethods) -> Result<()> {
        let missing = self.missing(required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(GatewayError::connection(format!(
                "contract binding is missing required methods: {}",
                missing.join(", ")
            )))
        }
    }
}

/// A change call as handed to a wallet for signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub receiver_id: String,
    pub method_name: String,
    pub args: Value,
    pub gas: u64,
    pub deposit: u128,
}

/// Signs and broadcasts change calls. Implemented by the wallet.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign_and_send(&self, call: FunctionCall) -> Result<TransactionHandle>;
}

/// A remote contract bound to an allow-list of methods.
#[async_trait]
pub trait ContractProxy: Send + Sync {
    fn contract_id(&self) -> &str;

    fn methods(&self) -> &ContractMethods;

    async fn view(&self, method: &str, args: Value) -> Result<Value>;

    async fn call(
        &self,
        method: &str,
        args: Value,
        gas: Option<u64>,
        attached_deposit: Option<u128>,
    ) -> Result<TransactionHandle>;
}
