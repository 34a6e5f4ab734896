//! The contract gateway: one facade over session, contract and chain.
//!
//! UI code talks to [`Gateway`] only. It hides unit conversion, the
//! balance pre-checks on `withdraw` and `bet`, and the top-up attached to
//! a bet when the player's contract balance cannot cover it.
//!
//! Every remote failure is returned as a typed [`GatewayError`]; nothing is
//! retried here. The one deliberate exception to error reporting is
//! [`Gateway::withdraw`] above the known balance, which is skipped quietly.

use crate::config::GatewayConfig;
use crate::contract::{ContractMethods, ContractProxy};
use crate::error::{GatewayError, Result};
use crate::query::{transaction_last_result, ChainQueryProvider, PENDING_TX_CAUSES, TX_STATUS_METHOD};
use crate::session::SessionProvider;
use crate::types::{
    AccountStatus, Bet, BetInfo, ContractStatus, RoundStatus, SignInRequest, TransactionHandle,
};
use crate::units::{chips_to_minimal, to_minimal_units, MinimalAmount, ONE_CHIP};
use parking_lot::RwLock;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayState {
    Unauthenticated,
    Authenticated { account_id: String },
}

pub struct Gateway {
    config: GatewayConfig,
    session: Arc<dyn SessionProvider>,
    contract: Arc<dyn ContractProxy>,
    chain: Arc<dyn ChainQueryProvider>,
    status: RwLock<Option<AccountStatus>>,
}

impl Gateway {
    pub async fn initialize(
        config: GatewayConfig,
        session: Arc<dyn SessionProvider>,
        contract: Arc<dyn ContractProxy>,
        chain: Arc<dyn ChainQueryProvider>,
    ) -> Result<Self> {
        config.validate()?;

        session
            .connect(&config.network)
            .await
            .map_err(|e| match e {
                GatewayError::Connection(_) => e,
                other => GatewayError::connection(format!("Failed to connect session: {}", other)),
            })?;

        contract.methods().require(&ContractMethods::roulette())?;

        if contract.contract_id() != config.contract_name() {
            tracing::warn!(
                "Contract proxy is bound to '{}' but config names '{}'",
                contract.contract_id(),
                config.contract_name()
            );
        }

        tracing::info!(
            "Gateway ready for '{}' on {}",
            contract.contract_id(),
            config.network.network_id
        );

        Ok(Self {
            config,
            session,
            contract,
            chain,
            status: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn contract_id(&self) -> &str {
        self.contract.contract_id()
    }

    // Session

    pub fn state(&self) -> GatewayState {
        match self.account_id() {
            Some(account_id) => GatewayState::Authenticated { account_id },
            None => GatewayState::Unauthenticated,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    pub fn account_id(&self) -> Option<String> {
        self.session.account_id().filter(|id| !id.is_empty())
    }

    pub async fn sign_in(&self, display_name: &str) -> Result<SignInRequest> {
        self.session
            .request_sign_in(self.contract.contract_id(), display_name)
            .await
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.session.sign_out().await?;
        *self.status.write() = None;
        Ok(())
    }

    fn require_account(&self) -> Result<String> {
        self.account_id()
            .ok_or_else(|| GatewayError::not_signed_in("no account is signed in"))
    }

    // Reads

    /// Fetch the signed-in account's status and remember it for the
    /// `withdraw` and `bet` guards.
    pub async fn get_account_status(&self) -> Result<AccountStatus> {
        let account_id = self.require_account()?;
        let raw = self
            .contract
            .view("get_account_status", json!({ "account_id": account_id }))
            .await?;
        let status: AccountStatus = serde_json::from_value(raw)?;

        *self.status.write() = Some(status.clone());
        Ok(status)
    }

    pub fn cached_account_status(&self) -> Option<AccountStatus> {
        self.status.read().clone()
    }

    pub async fn get_round_status(&self) -> Result<RoundStatus> {
        let raw = self.contract.view("get_round_status", json!({})).await?;
        Ok(serde_json::from_value(raw)?)
    }

    pub async fn get_contract_status(&self) -> Result<ContractStatus> {
        let raw = self.contract.view("get_contract_status", json!({})).await?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Last known balance, fetching the account status if nothing is cached.
    async fn known_balance(&self) -> Result<u128> {
        let cached = self.status.read().as_ref().map(|s| s.balance.as_u128());
        match cached {
            Some(balance) => Ok(balance),
            None => Ok(self.get_account_status().await?.balance.as_u128()),
        }
    }

    // Writes

    async fn submit(
        &self,
        method: &str,
        args: Value,
        attached_deposit: Option<u128>,
    ) -> Result<TransactionHandle> {
        tracing::debug!(
            "Calling {}.{} with {} (deposit: {:?})",
            self.contract.contract_id(),
            method,
            args,
            attached_deposit
        );

        let handle = self
            .contract
            .call(method, args, Some(self.config.gas), attached_deposit)
            .await
            .map_err(|e| match e {
                GatewayError::Submission(_) | GatewayError::NotSignedIn(_) => e,
                other => GatewayError::submission(format!("{} failed: {}", method, other)),
            })?;

        tracing::info!("Submitted {} as {}", method, handle.hash);
        Ok(handle)
    }

    /// Move `chips` into the player's contract balance.
    pub async fn deposit(&self, chips: u64) -> Result<TransactionHandle> {
        self.require_account()?;
        if chips == 0 {
            return Err(GatewayError::invalid_amount("deposit must be at least one chip"));
        }

        let amount = chips_to_minimal(chips)?;
        self.submit(
            "deposit",
            json!({ "amount": MinimalAmount(amount) }),
            Some(amount),
        )
        .await
    }

    /// Withdraw `chips` from the contract balance.
    ///
    /// A request above the last known balance is not submitted and returns
    /// `Ok(None)` rather than an error; the contract would reject it anyway.
    pub async fn withdraw(&self, chips: u64) -> Result<Option<TransactionHandle>> {
        self.require_account()?;
        if chips == 0 {
            return Err(GatewayError::invalid_amount("withdrawal must be at least one chip"));
        }

        let amount = chips_to_minimal(chips)?;
        let balance = self.known_balance().await?;
        if amount > balance {
            tracing::warn!(
                "Skipping withdrawal of {} chips: balance is {}",
                chips,
                MinimalAmount(balance).to_display()
            );
            return Ok(None);
        }

        self.submit("withdraw", json!({ "amount": MinimalAmount(amount) }), None)
            .await
            .map(Some)
    }

    /// Place `bets` for round `round_index` in a single submission. When the
    /// wager exceeds the known balance the shortfall is attached to the call.
    pub async fn bet(&self, bets: &[Bet], round_index: u64) -> Result<TransactionHandle> {
        self.require_account()?;
        if bets.is_empty() {
            return Err(GatewayError::invalid_input("no bets to place"));
        }

        let mut wire_bets: Vec<BetInfo> = Vec::with_capacity(bets.len());
        let mut total: u128 = 0;
        for bet in bets {
            bet.validate()?;
            let info = bet.to_info()?;
            total = total
                .checked_add(info.chips.as_u128())
                .ok_or_else(|| GatewayError::invalid_amount("total bet overflows"))?;
            wire_bets.push(info);
        }

        let balance = self.known_balance().await?;
        let top_up = top_up_amount(total, balance);
        if let Some(top_up) = top_up {
            tracing::info!(
                "Bet of {} exceeds balance {}, attaching {}",
                MinimalAmount(total).to_display(),
                MinimalAmount(balance).to_display(),
                MinimalAmount(top_up).to_display()
            );
        }

        self.submit(
            "bet",
            json!({ "bets": wire_bets, "round_index": round_index.to_string() }),
            top_up,
        )
        .await
    }

    /// Stake a display `amount` into the house pool.
    pub async fn stake(&self, amount: &str) -> Result<TransactionHandle> {
        self.require_account()?;
        let amount = positive_amount(amount)?;
        self.submit(
            "stake",
            json!({ "amount": MinimalAmount(amount) }),
            Some(amount),
        )
        .await
    }

    pub async fn unstake(&self, amount: &str, index: usize) -> Result<TransactionHandle> {
        self.require_account()?;
        let amount = positive_amount(amount)?;
        self.submit(
            "unstake",
            json!({ "amount": MinimalAmount(amount), "index": index }),
            None,
        )
        .await
    }

    pub async fn harvest(&self, index: usize) -> Result<TransactionHandle> {
        self.require_account()?;
        self.submit("harvest", json!({ "index": index }), None).await
    }

    /// Resolve the current round. The contract wants the round index, so
    /// this reads it first.
    pub async fn spin_wheel(&self) -> Result<TransactionHandle> {
        self.require_account()?;
        let round = self.get_round_status().await?;
        self.submit(
            "spin_wheel",
            json!({ "round_index": round.round_index.to_string() }),
            None,
        )
        .await
    }

    /// Decoded return value of a submitted transaction.
    pub async fn get_result(&self, handle: &TransactionHandle) -> Result<Value> {
        let account_id = self.require_account()?;
        let raw = match self
            .chain
            .query(TX_STATUS_METHOD, json!([handle.hash, account_id]))
            .await
        {
            Ok(raw) => raw,
            Err(GatewayError::Rpc { name, .. }) if PENDING_TX_CAUSES.contains(&name.as_str()) => {
                return Err(GatewayError::result_unavailable(&handle.hash));
            }
            Err(e) => return Err(e),
        };

        transaction_last_result(&raw, &handle.hash)
    }
}

/// Value to attach to a bet of `total` against `balance`: the shortfall
/// rounded down to whole chips, or nothing if the balance covers it.
pub fn top_up_amount(total: u128, balance: u128) -> Option<u128> {
    if total <= balance {
        return None;
    }
    let shortfall = (total - balance) / ONE_CHIP * ONE_CHIP;
    if shortfall == 0 {
        None
    } else {
        Some(shortfall)
    }
}

fn positive_amount(amount: &str) -> Result<u128> {
    let minimal = to_minimal_units(amount)?;
    if minimal == 0 {
        return Err(GatewayError::invalid_amount("amount must be greater than 0"));
    }
    Ok(minimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environment, NetworkConfig};
    use crate::types::BetType;
    use crate::units::ONE_DISPLAY_UNIT;
    use async_trait::async_trait;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use parking_lot::Mutex;
    use std::collections::HashMap;

    const CONTRACT: &str = "near-roulette.testnet";

    #[derive(Default)]
    struct MockSession {
        account: RwLock<Option<String>>,
        unreachable: bool,
    }

    impl MockSession {
        fn signed_in(account: &str) -> Arc<Self> {
            Arc::new(Self {
                account: RwLock::new(Some(account.to_string())),
                unreachable: false,
            })
        }

        fn signed_out() -> Arc<Self> {
            Arc::new(Self::default())
        }
    }

    #[async_trait]
    impl SessionProvider for MockSession {
        async fn connect(&self, _network: &NetworkConfig) -> Result<()> {
            if self.unreachable {
                return Err(GatewayError::internal("network down"));
            }
            Ok(())
        }

        fn is_signed_in(&self) -> bool {
            self.account.read().is_some()
        }

        async fn request_sign_in(
            &self,
            contract_id: &str,
            display_name: &str,
        ) -> Result<SignInRequest> {
            Ok(SignInRequest {
                contract_id: contract_id.to_string(),
                display_name: display_name.to_string(),
                redirect_url: "https://wallet.example/login/".to_string(),
            })
        }

        async fn sign_out(&self) -> Result<()> {
            *self.account.write() = None;
            Ok(())
        }

        fn account_id(&self) -> Option<String> {
            self.account.read().clone()
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct RecordedCall {
        method: String,
        args: Value,
        gas: Option<u64>,
        deposit: Option<u128>,
    }

    struct MockContract {
        methods: ContractMethods,
        views: Mutex<HashMap<String, Value>>,
        view_calls: Mutex<Vec<(String, Value)>>,
        calls: Mutex<Vec<RecordedCall>>,
        transport_down: bool,
    }

    impl MockContract {
        fn new() -> Self {
            Self {
                methods: ContractMethods::roulette(),
                views: Mutex::new(HashMap::new()),
                view_calls: Mutex::new(Vec::new()),
                calls: Mutex::new(Vec::new()),
                transport_down: false,
            }
        }

        fn with_balance(balance: u128) -> Arc<Self> {
            let contract = Self::new();
            contract.set_view(
                "get_account_status",
                json!({ "bets": [], "balance": balance.to_string(), "stakes": [] }),
            );
            contract.set_view(
                "get_round_status",
                json!({
                    "current_round_block_index": "100",
                    "round_index": "5",
                    "next_round_block_index": "160",
                    "last_round_win_number": 0,
                    "spinning": false,
                    "bet_amount": "0",
                    "bet_count": 0
                }),
            );
            Arc::new(contract)
        }

        fn set_view(&self, method: &str, value: Value) {
            self.views.lock().insert(method.to_string(), value);
        }

        fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().clone()
        }

        fn view_count(&self, method: &str) -> usize {
            self.view_calls
                .lock()
                .iter()
                .filter(|(m, _)| m == method)
                .count()
        }
    }

    #[async_trait]
    impl ContractProxy for MockContract {
        fn contract_id(&self) -> &str {
            CONTRACT
        }

        fn methods(&self) -> &ContractMethods {
            &self.methods
        }

        async fn view(&self, method: &str, args: Value) -> Result<Value> {
            self.view_calls.lock().push((method.to_string(), args));
            self.views
                .lock()
                .get(method)
                .cloned()
                .ok_or_else(|| GatewayError::connection(format!("no view '{}'", method)))
        }

        async fn call(
            &self,
            method: &str,
            args: Value,
            gas: Option<u64>,
            attached_deposit: Option<u128>,
        ) -> Result<TransactionHandle> {
            if self.transport_down {
                return Err(GatewayError::connection("connection reset"));
            }
            let mut calls = self.calls.lock();
            calls.push(RecordedCall {
                method: method.to_string(),
                args,
                gas,
                deposit: attached_deposit,
            });
            Ok(TransactionHandle {
                hash: format!("tx{}", calls.len()),
                signer_id: "alice.testnet".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct MockChain {
        tx_status: Mutex<Option<Value>>,
        queries: Mutex<Vec<(String, Value)>>,
    }

    #[async_trait]
    impl ChainQueryProvider for MockChain {
        async fn query(&self, method: &str, params: Value) -> Result<Value> {
            self.queries.lock().push((method.to_string(), params));
            self.tx_status.lock().clone().ok_or_else(|| GatewayError::Rpc {
                code: -32000,
                name: "UNKNOWN_TRANSACTION".to_string(),
                message: "Transaction doesn't exist".to_string(),
            })
        }
    }

    async fn gateway(
        session: Arc<MockSession>,
        contract: Arc<MockContract>,
        chain: Arc<MockChain>,
    ) -> Gateway {
        Gateway::initialize(
            GatewayConfig::with_contract(Environment::Development, CONTRACT),
            session,
            contract,
            chain,
        )
        .await
        .unwrap()
    }

    async fn signed_in_gateway(balance: u128) -> (Gateway, Arc<MockContract>) {
        let contract = MockContract::with_balance(balance);
        let gateway = gateway(
            MockSession::signed_in("alice.testnet"),
            contract.clone(),
            Arc::new(MockChain::default()),
        )
        .await;
        (gateway, contract)
    }

    #[tokio::test]
    async fn test_initialize_rejects_missing_capability() {
        let mut contract = MockContract::new();
        contract.methods = ContractMethods::new(VIEW_ONLY, ["bet"]);

        let result = Gateway::initialize(
            GatewayConfig::with_contract(Environment::Development, CONTRACT),
            MockSession::signed_out(),
            Arc::new(contract),
            Arc::new(MockChain::default()),
        )
        .await;

        assert!(result.err().unwrap().is_connection());
    }

    const VIEW_ONLY: [&str; 3] = ["get_account_status", "get_round_status", "get_contract_status"];

    #[tokio::test]
    async fn test_initialize_reports_unreachable_session_as_connection_error() {
        let session = Arc::new(MockSession {
            account: RwLock::new(None),
            unreachable: true,
        });

        let result = Gateway::initialize(
            GatewayConfig::with_contract(Environment::Development, CONTRACT),
            session,
            Arc::new(MockContract::new()),
            Arc::new(MockChain::default()),
        )
        .await;

        assert!(result.err().unwrap().is_connection());
    }

    #[tokio::test]
    async fn test_state_follows_session() {
        let session = MockSession::signed_in("alice.testnet");
        let gateway = gateway(
            session.clone(),
            MockContract::with_balance(0),
            Arc::new(MockChain::default()),
        )
        .await;

        assert!(gateway.is_signed_in());
        assert_eq!(
            gateway.state(),
            GatewayState::Authenticated {
                account_id: "alice.testnet".to_string()
            }
        );

        gateway.get_account_status().await.unwrap();
        assert!(gateway.cached_account_status().is_some());

        gateway.sign_out().await.unwrap();
        assert_eq!(gateway.state(), GatewayState::Unauthenticated);
        assert!(gateway.cached_account_status().is_none());
    }

    #[tokio::test]
    async fn test_sign_in_targets_bound_contract() {
        let gateway = gateway(
            MockSession::signed_out(),
            MockContract::with_balance(0),
            Arc::new(MockChain::default()),
        )
        .await;

        let request = gateway.sign_in("NEAR Roulette").await.unwrap();
        assert_eq!(request.contract_id, CONTRACT);
        assert_eq!(request.display_name, "NEAR Roulette");
    }

    #[tokio::test]
    async fn test_account_status_requires_sign_in() {
        let contract = MockContract::with_balance(0);
        let gateway = gateway(
            MockSession::signed_out(),
            contract.clone(),
            Arc::new(MockChain::default()),
        )
        .await;

        let err = gateway.get_account_status().await.unwrap_err();
        assert!(err.is_not_signed_in());
        assert_eq!(contract.view_count("get_account_status"), 0);
    }

    #[tokio::test]
    async fn test_account_status_is_fetched_for_account_and_cached() {
        let (gateway, contract) = signed_in_gateway(ONE_DISPLAY_UNIT).await;

        let status = gateway.get_account_status().await.unwrap();
        assert_eq!(status.balance.as_u128(), ONE_DISPLAY_UNIT);
        assert_eq!(gateway.cached_account_status(), Some(status));

        let view_calls = contract.view_calls.lock().clone();
        assert_eq!(
            view_calls[0],
            (
                "get_account_status".to_string(),
                json!({ "account_id": "alice.testnet" })
            )
        );
    }

    #[tokio::test]
    async fn test_round_and_contract_status_work_signed_out() {
        let contract = MockContract::with_balance(0);
        contract.set_view(
            "get_contract_status",
            json!({
                "balance": "10",
                "max_bet_amount": "1",
                "stake_amount": "5",
                "profit_amount": "0",
                "loss_amount": "0"
            }),
        );
        let gateway = gateway(
            MockSession::signed_out(),
            contract,
            Arc::new(MockChain::default()),
        )
        .await;

        assert_eq!(gateway.get_round_status().await.unwrap().round_index, 5);
        assert_eq!(
            gateway
                .get_contract_status()
                .await
                .unwrap()
                .stake_amount
                .as_u128(),
            5
        );
    }

    #[tokio::test]
    async fn test_withdraw_over_balance_is_skipped() {
        // 1 display unit == 100 chips
        let (gateway, contract) = signed_in_gateway(ONE_DISPLAY_UNIT).await;
        gateway.get_account_status().await.unwrap();

        let outcome = gateway.withdraw(101).await.unwrap();
        assert!(outcome.is_none());
        assert!(contract.calls().is_empty());
    }

    #[tokio::test]
    async fn test_withdraw_within_balance_submits_once() {
        let (gateway, contract) = signed_in_gateway(ONE_DISPLAY_UNIT).await;
        gateway.get_account_status().await.unwrap();

        let handle = gateway.withdraw(100).await.unwrap();
        assert!(handle.is_some());

        let calls = contract.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "withdraw");
        assert_eq!(
            calls[0].args,
            json!({ "amount": "1000000000000000000000000" })
        );
        assert_eq!(calls[0].deposit, None);
    }

    #[tokio::test]
    async fn test_withdraw_fetches_status_when_nothing_cached() {
        let (gateway, contract) = signed_in_gateway(0).await;

        assert!(gateway.withdraw(1).await.unwrap().is_none());
        assert_eq!(contract.view_count("get_account_status"), 1);
        assert!(contract.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bet_with_empty_balance_attaches_full_amount() {
        let (gateway, contract) = signed_in_gateway(0).await;
        gateway.get_account_status().await.unwrap();

        let bet = Bet {
            bet_type: 1,
            number: 7,
            chips: 100,
        };
        gateway.bet(&[bet], 5).await.unwrap();

        let calls = contract.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "bet");
        assert_eq!(calls[0].deposit, Some(ONE_DISPLAY_UNIT));
        assert_eq!(calls[0].gas, Some(gateway.config().gas));
        assert_eq!(
            calls[0].args,
            json!({
                "bets": [{ "bet_type": 1, "number": 7, "chips": "1000000000000000000000000" }],
                "round_index": "5"
            })
        );
    }

    #[tokio::test]
    async fn test_bet_covered_by_balance_attaches_nothing() {
        let (gateway, contract) = signed_in_gateway(2 * ONE_DISPLAY_UNIT).await;
        gateway.get_account_status().await.unwrap();

        let bets = [
            Bet::new(BetType::Color, 1, 100),
            Bet::new(BetType::Number, 17, 100),
        ];
        gateway.bet(&bets, 9).await.unwrap();

        let calls = contract.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].deposit, None);
        assert_eq!(calls[0].args["bets"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_bet_top_up_is_rounded_down_to_chips() {
        // half a chip in the balance, 150 chips wagered
        let (gateway, contract) = signed_in_gateway(ONE_CHIP / 2).await;

        gateway
            .bet(&[Bet::new(BetType::Dozen, 0, 150)], 1)
            .await
            .unwrap();

        assert_eq!(contract.calls()[0].deposit, Some(149 * ONE_CHIP));
        // status was fetched inside the call because nothing was cached
        assert_eq!(contract.view_count("get_account_status"), 1);
    }

    #[tokio::test]
    async fn test_bet_rejects_invalid_input_without_submitting() {
        let (gateway, contract) = signed_in_gateway(ONE_DISPLAY_UNIT).await;

        assert!(matches!(
            gateway.bet(&[], 1).await,
            Err(GatewayError::InvalidInput(_))
        ));
        assert!(matches!(
            gateway.bet(&[Bet::new(BetType::Number, 17, 0)], 1).await,
            Err(GatewayError::InvalidInput(_))
        ));
        assert!(matches!(
            gateway
                .bet(&[Bet { bet_type: 6, number: 0, chips: 1 }], 1)
                .await,
            Err(GatewayError::InvalidInput(_))
        ));
        assert!(contract.calls().is_empty());
    }

    #[test]
    fn test_top_up_amount() {
        assert_eq!(top_up_amount(ONE_DISPLAY_UNIT, ONE_DISPLAY_UNIT), None);
        assert_eq!(top_up_amount(ONE_DISPLAY_UNIT, 0), Some(ONE_DISPLAY_UNIT));
        assert_eq!(top_up_amount(ONE_CHIP, ONE_CHIP - 1), None);
        assert_eq!(
            top_up_amount(3 * ONE_CHIP, ONE_CHIP / 2),
            Some(2 * ONE_CHIP)
        );
    }

    #[tokio::test]
    async fn test_writes_require_sign_in() {
        let contract = MockContract::with_balance(ONE_DISPLAY_UNIT);
        let gateway = gateway(
            MockSession::signed_out(),
            contract.clone(),
            Arc::new(MockChain::default()),
        )
        .await;

        assert!(gateway.deposit(1).await.unwrap_err().is_not_signed_in());
        assert!(gateway.withdraw(1).await.unwrap_err().is_not_signed_in());
        assert!(gateway
            .bet(&[Bet::new(BetType::Color, 0, 1)], 1)
            .await
            .unwrap_err()
            .is_not_signed_in());
        assert!(gateway.spin_wheel().await.unwrap_err().is_not_signed_in());
        assert!(contract.calls().is_empty());
    }

    #[tokio::test]
    async fn test_deposit_and_stake_attach_their_amount() {
        let (gateway, contract) = signed_in_gateway(0).await;

        gateway.deposit(250).await.unwrap();
        gateway.stake("1.5").await.unwrap();
        gateway.unstake("0.5", 2).await.unwrap();
        gateway.harvest(0).await.unwrap();

        let calls = contract.calls();
        assert_eq!(calls.len(), 4);

        assert_eq!(calls[0].method, "deposit");
        assert_eq!(calls[0].deposit, Some(250 * ONE_CHIP));
        assert_eq!(calls[0].args, json!({ "amount": (250 * ONE_CHIP).to_string() }));

        assert_eq!(calls[1].method, "stake");
        assert_eq!(calls[1].deposit, Some(ONE_DISPLAY_UNIT * 3 / 2));

        assert_eq!(calls[2].method, "unstake");
        assert_eq!(calls[2].deposit, None);
        assert_eq!(
            calls[2].args,
            json!({ "amount": (ONE_DISPLAY_UNIT / 2).to_string(), "index": 2 })
        );

        assert_eq!(calls[3].args, json!({ "index": 0 }));
        assert!(gateway.stake("0").await.is_err());
    }

    #[tokio::test]
    async fn test_spin_wheel_uses_current_round() {
        let (gateway, contract) = signed_in_gateway(0).await;

        let handle = gateway.spin_wheel().await.unwrap();
        assert_eq!(handle.hash, "tx1");

        let calls = contract.calls();
        assert_eq!(calls[0].method, "spin_wheel");
        assert_eq!(calls[0].args, json!({ "round_index": "5" }));
    }

    #[tokio::test]
    async fn test_transport_failure_is_submission_error() {
        let mut contract = MockContract::new();
        contract.transport_down = true;
        let gateway = gateway(
            MockSession::signed_in("alice.testnet"),
            Arc::new(contract),
            Arc::new(MockChain::default()),
        )
        .await;

        assert!(gateway.deposit(1).await.unwrap_err().is_submission());
    }

    #[tokio::test]
    async fn test_get_result_before_and_after_finalization() {
        let chain = Arc::new(MockChain::default());
        let gateway = gateway(
            MockSession::signed_in("alice.testnet"),
            MockContract::with_balance(0),
            chain.clone(),
        )
        .await;
        let handle = TransactionHandle {
            hash: "9FkTx".to_string(),
            signer_id: "alice.testnet".to_string(),
        };

        let err = gateway.get_result(&handle).await.unwrap_err();
        assert!(err.is_result_unavailable());

        *chain.tx_status.lock() = Some(json!({ "status": "Started" }));
        assert!(gateway
            .get_result(&handle)
            .await
            .unwrap_err()
            .is_result_unavailable());

        let value = json!({ "win_number": 17 });
        *chain.tx_status.lock() = Some(json!({
            "status": { "SuccessValue": STANDARD.encode(value.to_string()) }
        }));
        assert_eq!(gateway.get_result(&handle).await.unwrap(), value);

        let queries = chain.queries.lock().clone();
        assert_eq!(
            queries[0],
            (
                TX_STATUS_METHOD.to_string(),
                json!(["9FkTx", "alice.testnet"])
            )
        );
    }

    #[tokio::test]
    async fn test_get_result_requires_sign_in() {
        let chain = Arc::new(MockChain::default());
        let gateway = gateway(
            MockSession::signed_out(),
            MockContract::with_balance(0),
            chain.clone(),
        )
        .await;
        let handle = TransactionHandle {
            hash: "h".to_string(),
            signer_id: "alice.testnet".to_string(),
        };

        assert!(gateway.get_result(&handle).await.unwrap_err().is_not_signed_in());
        assert!(chain.queries.lock().is_empty());
    }
}
