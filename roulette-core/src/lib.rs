//! Roulette gateway - client library for the NEAR roulette contract
//!
//! Wraps session handling, contract calls and transaction lookups behind a
//! single [`Gateway`], and converts between display amounts, chips and the
//! chain's minimal units.

pub mod config;
pub mod contract;
pub mod error;
pub mod gateway;
pub mod query;
pub mod session;
pub mod types;
pub mod units;

pub use config::{Environment, GatewayConfig, NetworkConfig};
pub use contract::{ContractMethods, ContractProxy, RpcClient, RpcContract, TransactionSigner};
pub use error::{GatewayError, Result};
pub use gateway::{Gateway, GatewayState};
pub use query::ChainQueryProvider;
pub use session::{LocalSession, SessionProvider};
pub use types::{
    AccountStatus, Bet, BetType, ContractStatus, RoundStatus, SignInRequest, TransactionHandle,
};
pub use units::{from_minimal_units, to_minimal_units, MinimalAmount};

use std::sync::Arc;

/// Gateway wired to the node named in `config`. Change calls need a signer
/// attached to the contract proxy; this one has none.
pub async fn connect(config: GatewayConfig, session: Arc<dyn SessionProvider>) -> Result<Gateway> {
    let client = Arc::new(RpcClient::new(
        config.network.node_url.clone(),
        config.request_timeout,
    )?);
    let contract = Arc::new(RpcContract::new(
        client.clone(),
        config.contract_name(),
        config.gas,
    ));

    Gateway::initialize(config, session, contract, client).await
}
