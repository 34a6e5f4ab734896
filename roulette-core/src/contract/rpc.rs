//! JSON-RPC transport to a chain node, and a contract proxy on top of it.

use crate::contract::{ContractMethods, ContractProxy, FunctionCall, TransactionSigner};
use crate::error::{GatewayError, Result};
use crate::query::ChainQueryProvider;
use crate::types::TransactionHandle;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub struct RpcClient {
    node_url: String,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(node_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            node_url: node_url.into(),
            http,
            next_id: AtomicU64::new(1),
        })
    }

    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id.to_string(),
            "method": method,
            "params": params,
        });
        tracing::debug!("RPC {} -> {}: {}", method, self.node_url, request);

        let res = self
            .http
            .post(&self.node_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::connection(format!("RPC request '{}' failed: {}", method, e)))?;

        let status = res.status();
        let bytes = res
            .bytes()
            .await
            .map_err(|e| GatewayError::connection(format!("Failed to read RPC response: {}", e)))?;

        let body: Value = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(GatewayError::connection(format!(
                    "node responded with {}: {}",
                    status,
                    String::from_utf8_lossy(&bytes)
                )));
            }
            Err(e) => return Err(e.into()),
        };

        parse_rpc_response(body)
    }
}

#[async_trait]
impl ChainQueryProvider for RpcClient {
    async fn query(&self, method: &str, params: Value) -> Result<Value> {
        self.call(method, params).await
    }
}

/// Unwrap a JSON-RPC 2.0 envelope into its `result`, or a typed error.
pub fn parse_rpc_response(body: Value) -> Result<Value> {
    if let Some(error) = body.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or(-1);
        let name = error
            .pointer("/cause/name")
            .or_else(|| error.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("UNKNOWN")
            .to_string();
        let message = match error.get("data") {
            Some(Value::String(data)) => data.clone(),
            Some(data) => data.to_string(),
            None => error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no message")
                .to_string(),
        };
        return Err(GatewayError::Rpc {
            code,
            name,
            message,
        });
    }

    body.get("result")
        .cloned()
        .ok_or_else(|| GatewayError::internal("RPC response has neither result nor error"))
}

/// Decode the `call_function` result bytes into the JSON the view returned.
pub fn decode_view_result(result: &Value) -> Result<Value> {
    if let Some(error) = result.get("error").and_then(Value::as_str) {
        return Err(GatewayError::Rpc {
            code: -32000,
            name: "CONTRACT_EXECUTION_ERROR".to_string(),
            message: error.to_string(),
        });
    }

    let raw = result
        .get("result")
        .and_then(Value::as_array)
        .ok_or_else(|| GatewayError::internal("view response carries no result bytes"))?;

    let bytes = raw
        .iter()
        .map(|b| {
            b.as_u64()
                .and_then(|b| u8::try_from(b).ok())
                .ok_or_else(|| GatewayError::internal("view result is not a byte array"))
        })
        .collect::<Result<Vec<u8>>>()?;

    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

pub struct RpcContract {
    client: Arc<RpcClient>,
    contract_id: String,
    methods: ContractMethods,
    default_gas: u64,
    signer: Option<Arc<dyn TransactionSigner>>,
}

impl RpcContract {
    pub fn new(client: Arc<RpcClient>, contract_id: impl Into<String>, default_gas: u64) -> Self {
        Self {
            client,
            contract_id: contract_id.into(),
            methods: ContractMethods::roulette(),
            default_gas,
            signer: None,
        }
    }

    pub fn with_signer(mut self, signer: Arc<dyn TransactionSigner>) -> Self {
        self.signer = Some(signer);
        self
    }
}

#[async_trait]
impl ContractProxy for RpcContract {
    fn contract_id(&self) -> &str {
        &self.contract_id
    }

    fn methods(&self) -> &ContractMethods {
        &self.methods
    }

    async fn view(&self, method: &str, args: Value) -> Result<Value> {
        if !self.methods.is_view(method) {
            return Err(GatewayError::invalid_input(format!(
                "'{}' is not a view method of {}",
                method, self.contract_id
            )));
        }

        let args_base64 = STANDARD.encode(serde_json::to_vec(&args)?);
        let result = self
            .client
            .call(
                "query",
                json!({
                    "request_type": "call_function",
                    "finality": "final",
                    "account_id": self.contract_id,
                    "method_name": method,
                    "args_base64": args_base64,
                }),
            )
            .await?;

        decode_view_result(&result)
    }

    async fn call(
        &self,
        method: &str,
        args: Value,
        gas: Option<u64>,
        attached_deposit: Option<u128>,
    ) -> Result<TransactionHandle> {
        if !self.methods.is_change(method) {
            return Err(GatewayError::invalid_input(format!(
                "'{}' is not a change method of {}",
                method, self.contract_id
            )));
        }

        let signer = self.signer.as_ref().ok_or_else(|| {
            GatewayError::submission(format!(
                "no transaction signer configured for '{}'",
                method
            ))
        })?;

        signer
            .sign_and_send(FunctionCall {
                receiver_id: self.contract_id.clone(),
                method_name: method.to_string(),
                args,
                gas: gas.unwrap_or(self.default_gas),
                deposit: attached_deposit.unwrap_or(0),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rpc_result() {
        let body = json!({ "jsonrpc": "2.0", "id": "1", "result": { "ok": true } });
        assert_eq!(parse_rpc_response(body).unwrap(), json!({ "ok": true }));
    }

    #[test]
    fn test_parse_rpc_error_keeps_cause_name() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": "1",
            "error": {
                "code": -32000,
                "message": "Server error",
                "data": "Transaction 9Fk... doesn't exist",
                "cause": { "name": "UNKNOWN_TRANSACTION", "info": {} },
                "name": "HANDLER_ERROR"
            }
        });

        match parse_rpc_response(body).unwrap_err() {
            GatewayError::Rpc {
                code,
                name,
                message,
            } => {
                assert_eq!(code, -32000);
                assert_eq!(name, "UNKNOWN_TRANSACTION");
                assert!(message.contains("doesn't exist"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_decode_view_result() {
        let payload = br#"{"round_index":"3"}"#;
        let result = json!({
            "result": payload.to_vec(),
            "logs": [],
            "block_height": 10,
            "block_hash": "abc"
        });
        assert_eq!(
            decode_view_result(&result).unwrap(),
            json!({ "round_index": "3" })
        );

        assert_eq!(
            decode_view_result(&json!({ "result": [] })).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_decode_view_execution_error() {
        let result = json!({ "error": "wasm execution failed with error: MethodNotFound", "logs": [] });
        assert!(matches!(
            decode_view_result(&result),
            Err(GatewayError::Rpc { .. })
        ));
    }

    #[tokio::test]
    async fn test_change_call_without_signer_is_submission_error() {
        let client = Arc::new(RpcClient::new("http://localhost:3030", Duration::from_secs(1)).unwrap());
        let contract = RpcContract::new(client, "roulette.testnet", 1);

        let err = contract
            .call("deposit", json!({}), None, Some(1))
            .await
            .unwrap_err();
        assert!(err.is_submission());

        let err = contract
            .call("get_round_status", json!({}), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidInput(_)));
    }

    struct RecordingSigner {
        calls: parking_lot::Mutex<Vec<FunctionCall>>,
    }

    #[async_trait]
    impl TransactionSigner for RecordingSigner {
        async fn sign_and_send(&self, call: FunctionCall) -> Result<TransactionHandle> {
            self.calls.lock().push(call);
            Ok(TransactionHandle {
                hash: "8mQx".to_string(),
                signer_id: "alice.testnet".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_change_call_goes_to_signer_with_defaults() {
        let client = Arc::new(RpcClient::new("http://localhost:3030", Duration::from_secs(1)).unwrap());
        let signer = Arc::new(RecordingSigner {
            calls: parking_lot::Mutex::new(Vec::new()),
        });
        let contract =
            RpcContract::new(client, "roulette.testnet", 42).with_signer(signer.clone());

        let handle = contract
            .call("harvest", json!({ "index": 0 }), None, None)
            .await
            .unwrap();
        assert_eq!(handle.hash, "8mQx");

        let calls = signer.calls.lock().clone();
        assert_eq!(
            calls,
            vec![FunctionCall {
                receiver_id: "roulette.testnet".to_string(),
                method_name: "harvest".to_string(),
                args: json!({ "index": 0 }),
                gas: 42,
                deposit: 0,
            }]
        );
    }
}
