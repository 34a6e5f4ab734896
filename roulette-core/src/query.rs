use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;

pub const TX_STATUS_METHOD: &str = "EXPERIMENTAL_tx_status";

/// RPC error causes meaning "ask again later" for a transaction lookup.
pub const PENDING_TX_CAUSES: [&str; 2] = ["UNKNOWN_TRANSACTION", "TIMEOUT_ERROR"];

/// Read-only access to the chain, outside any contract binding.
#[async_trait]
pub trait ChainQueryProvider: Send + Sync {
    async fn query(&self, method: &str, params: Value) -> Result<Value>;
}

/// Return value of the last receipt of a finalized transaction.
///
/// `SuccessValue` is base64-encoded JSON; an empty value decodes to `null`.
/// Anything short of a final status yields `ResultUnavailable`, and a
/// `Failure` status is reported as a `Submission` error.
pub fn transaction_last_result(raw: &Value, hash: &str) -> Result<Value> {
    let status = match raw.get("status") {
        Some(status) => status,
        None => return Err(GatewayError::result_unavailable(hash)),
    };

    if let Some(encoded) = status.get("SuccessValue").and_then(Value::as_str) {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| GatewayError::internal(format!("Invalid SuccessValue encoding: {}", e)))?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        return Ok(serde_json::from_slice(&bytes)?);
    }

    if let Some(failure) = status.get("Failure") {
        return Err(GatewayError::submission(format!(
            "transaction {} failed: {}",
            hash, failure
        )));
    }

    // "NotStarted", "Started" or a status this client does not know yet
    Err(GatewayError::result_unavailable(hash))
}
