//! Low-level JSON-RPC client for EVM nodes.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::RpcError;
use crate::types::{Address, BlockReference, BlockView, Bytes, U256};

/// JSON-RPC request structure.
#[derive(Serialize)]
struct JsonRpcRequest<'a, P: Serialize> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

/// JSON-RPC response structure.
#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<T>,
    error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Low-level JSON-RPC client for one EVM node.
///
/// Every call is a single HTTP request. Failures, transport faults included,
/// are returned to the caller as they are; deciding whether another node
/// should be asked is the job of the
/// [`FallbackExecutor`](crate::FallbackExecutor).
pub struct RpcClient {
    url: String,
    client: reqwest::Client,
    request_id: AtomicU64,
}

impl RpcClient {
    /// Create a new RPC client with the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
            request_id: AtomicU64::new(0),
        }
    }

    /// Get the RPC URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Make a raw RPC call.
    pub async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, RpcError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.request_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::trace!(url = %self.url, method, status = status.as_u16(), "rpc response");

        parse_response(status.as_u16(), &body)
    }

    // ========================================================================
    // High-level RPC methods
    // ========================================================================

    /// Current block number (`eth_blockNumber`).
    pub async fn block_number(&self) -> Result<u64, RpcError> {
        let quantity: String = self.call("eth_blockNumber", serde_json::json!([])).await?;
        parse_quantity(&quantity)
    }

    /// Balance in wei as the node's hex quantity (`eth_getBalance`).
    pub async fn get_balance(
        &self,
        address: &Address,
        block: &BlockReference,
    ) -> Result<String, RpcError> {
        let params = serde_json::json!([address, block.to_rpc_param()]);
        self.call("eth_getBalance", params).await
    }

    /// 32-byte storage word as returned by the node (`eth_getStorageAt`).
    pub async fn get_storage_at(
        &self,
        address: &Address,
        position: &U256,
        block: &BlockReference,
    ) -> Result<String, RpcError> {
        let params = serde_json::json!([address, position, block.to_rpc_param()]);
        self.call("eth_getStorageAt", params).await
    }

    /// Deployed bytecode as returned by the node (`eth_getCode`).
    pub async fn get_code(
        &self,
        address: &Address,
        block: &BlockReference,
    ) -> Result<String, RpcError> {
        let params = serde_json::json!([address, block.to_rpc_param()]);
        self.call("eth_getCode", params).await
    }

    /// Block with transaction hashes or full objects (`eth_getBlockByNumber`).
    ///
    /// A `null` result means the node does not know the block and maps to
    /// [`RpcError::UnknownBlock`].
    pub async fn get_block_by_number(
        &self,
        block: &BlockReference,
        full_transactions: bool,
    ) -> Result<BlockView, RpcError> {
        let params = serde_json::json!([block.to_rpc_param(), full_transactions]);
        let value: serde_json::Value = self.call("eth_getBlockByNumber", params).await?;
        if value.is_null() {
            return Err(RpcError::UnknownBlock(block.to_string()));
        }
        serde_json::from_value(value).map_err(RpcError::Json)
    }

    /// Execute a read-only message call (`eth_call`).
    pub async fn eth_call(
        &self,
        to: &Address,
        data: &[u8],
        block: &BlockReference,
    ) -> Result<Bytes, RpcError> {
        let params = serde_json::json!([
            { "to": to, "data": Bytes::copy_from_slice(data) },
            block.to_rpc_param(),
        ]);
        self.call("eth_call", params).await
    }
}

impl Clone for RpcClient {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            client: self.client.clone(),
            request_id: AtomicU64::new(0),
        }
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("url", &self.url)
            .finish()
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Turn an HTTP status and body into a result.
///
/// A non-2xx status becomes [`RpcError::Network`] carrying the body, so a
/// node error sent with an HTTP error status still shows its message.
/// JSON-RPC returns `"result": null` for some lookups, so a missing result is
/// treated as `null` when `R` can represent it.
fn parse_response<R: DeserializeOwned>(status: u16, body: &str) -> Result<R, RpcError> {
    if !(200..300).contains(&status) {
        return Err(RpcError::network(format!("HTTP {status}: {body}"), Some(status)));
    }

    let rpc_response: JsonRpcResponse<serde_json::Value> =
        serde_json::from_str(body).map_err(RpcError::Json)?;

    if let Some(error) = rpc_response.error {
        return Err(parse_rpc_error(&error));
    }

    let result = rpc_response.result.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(result).map_err(|e| {
        RpcError::InvalidResponse(format!("Unexpected result shape: {e}"))
    })
}

/// Parse a JSON-RPC error object into a specific error type.
fn parse_rpc_error(error: &JsonRpcError) -> RpcError {
    let message = error.message.as_str();

    if error.code == 3 || message.starts_with("execution reverted") {
        return RpcError::ExecutionReverted {
            message: error.message.clone(),
            data: error
                .data
                .as_ref()
                .and_then(|d| d.as_str())
                .map(String::from),
        };
    }

    if message.contains("header not found") || message.contains("unknown block") {
        return RpcError::UnknownBlock(error.message.clone());
    }

    RpcError::Rpc {
        code: error.code,
        message: error.message.clone(),
        data: error.data.clone(),
    }
}

/// Parse a hex quantity such as `0x1b4`.
fn parse_quantity(quantity: &str) -> Result<u64, RpcError> {
    quantity
        .strip_prefix("0x")
        .and_then(|hex| u64::from_str_radix(hex, 16).ok())
        .ok_or_else(|| RpcError::InvalidResponse(format!("Invalid quantity: {quantity}")))
}
