//! Error types for archive-kit.
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error) - Main error type, returned by every explorer operation
//!   - [`RpcError`] - Transport and node errors (network faults, reverts, pruned state, ...)
//!   - [`AbiError`] - Interface parsing, argument encoding and return-data decoding
//!   - [`ParseBlockReferenceError`] - Invalid block reference
//!
//! Address and integer parse failures carry the `alloy-primitives` error
//! types.
//!
//! # Error Handling Examples
//!
//! ## Distinguishing pruned state from other failures
//!
//! ```rust
//! use archive_kit::{ErrorClass, ErrorClassifier, PrunedStateClassifier, RpcError};
//!
//! let err = RpcError::Rpc {
//!     code: -32000,
//!     message: "missing trie node 3b2b1a (path ) <nil>".to_string(),
//!     data: None,
//! };
//! assert_eq!(PrunedStateClassifier.classify(&err), ErrorClass::StatePruned);
//! ```

use thiserror::Error;

/// Error parsing a block reference.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid block reference '{0}'. Use 'latest', 'earliest', 'pending', 'safe', 'finalized', a decimal number or a 0x quantity")]
pub struct ParseBlockReferenceError(pub String);

/// Error handling a contract interface (ABI).
#[derive(Debug, Error)]
pub enum AbiError {
    #[error("Invalid ABI JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read ABI file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid ABI document: {0}")]
    Format(String),

    #[error("Unsupported ABI type: '{0}'")]
    UnsupportedType(String),

    #[error("Method {method} expects {expected} argument(s), got {actual}")]
    ArgumentCount {
        method: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid value {value} for {ty}: {reason}")]
    InvalidArgument {
        ty: String,
        value: String,
        reason: String,
    },

    #[error("Failed to encode call data: {0}")]
    Encode(String),

    #[error("Failed to decode return data: {0}")]
    Decode(String),
}

impl AbiError {
    pub(crate) fn invalid_argument(
        ty: impl ToString,
        value: &serde_json::Value,
        reason: impl Into<String>,
    ) -> Self {
        AbiError::InvalidArgument {
            ty: ty.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// RPC Errors
// ============================================================================

/// RPC-specific errors.
#[derive(Debug, Error)]
pub enum RpcError {
    // ─── Network/Transport ───
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // ─── Generic RPC Error ───
    #[error("RPC error: {message} (code: {code})")]
    Rpc {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },

    // ─── Node Errors ───
    #[error("Block not found: {0}")]
    UnknownBlock(String),

    #[error("Execution reverted: {message}")]
    ExecutionReverted {
        message: String,
        data: Option<String>,
    },
}

impl RpcError {
    /// Create a network error.
    pub fn network(message: impl Into<String>, status_code: Option<u16>) -> Self {
        RpcError::Network {
            message: message.into(),
            status_code,
        }
    }

    /// Returns true if the node reported a reverted call.
    pub fn is_reverted(&self) -> bool {
        matches!(self, RpcError::ExecutionReverted { .. })
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// Main error type for archive-kit operations.
#[derive(Debug, Error)]
pub enum Error {
    // ─── Configuration ───
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No contract configured. Call .contract() on ExplorerBuilder.")]
    NoContract,

    // ─── Contract catalog ───
    #[error("Method '{0}' is not a view method of the configured contract")]
    UnknownMethod(String),

    // ─── Parsing ───
    #[error("Invalid address: {0}")]
    ParseAddress(#[from] alloy_primitives::hex::FromHexError),

    #[error(transparent)]
    ParseBlockReference(#[from] ParseBlockReferenceError),

    #[error("Invalid integer: {0}")]
    ParseU256(#[from] alloy_primitives::ruint::ParseError),

    // ─── ABI ───
    #[error(transparent)]
    Abi(#[from] AbiError),

    // ─── RPC ───
    #[error(transparent)]
    Rpc(#[from] RpcError),
}
