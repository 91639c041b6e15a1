//! Client module: providers, fallback execution and the query façade.
//!
//! - [`Explorer`] - The façade, the single entry point for all queries
//! - [`ExplorerBuilder`] - Fluent builder for configuring the explorer
//! - [`FallbackExecutor`] - Full node first, archive node on pruned state
//! - [`RpcClient`] - Low-level JSON-RPC client, one request per call
//!
//! # Fallback
//!
//! | Full node outcome | Archive node | Result |
//! |-------------------|--------------|--------|
//! | success | not contacted | full node value |
//! | "missing trie node" | queried once | archive outcome |
//! | any other error | not contacted | full node error |
//!
//! Neither node is ever retried, and nothing waits between the two attempts.
//!
//! The rule is an [`ErrorClassifier`]; [`PrunedStateClassifier`] is the
//! default.

mod classifier;
mod explorer;
mod fallback;
mod provider;
mod report;
mod rpc;

pub use classifier::{
    ErrorClass, ErrorClassifier, PRUNED_STATE_INDICATOR, PrunedStateClassifier,
    is_pruned_state_error,
};
pub use explorer::{
    ARCHIVE_NODE_URL_ENV, CONTRACT_ABI_ENV, CONTRACT_ADDRESS_ENV, Explorer, ExplorerBuilder,
    FULL_NODE_URL_ENV,
};
pub use fallback::FallbackExecutor;
pub use provider::{ChainProvider, NodeRole, ProviderFuture, ProviderHandle};
pub use report::{INVALID_QUERY, MemoryReporter, Reporter, StdoutReporter};
pub use rpc::RpcClient;
