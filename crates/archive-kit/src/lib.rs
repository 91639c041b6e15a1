//! A resilient explorer for EVM chain state.
//!
//! **archive-kit** queries balances, storage slots, bytecode, block
//! transactions and contract view methods against a full node, and re-runs a
//! query once against an archive node when the full node has pruned the
//! requested state.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use archive_kit::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), archive_kit::Error> {
//!     // ETH_FULL_NODE_URL, ETH_ARCHIVE_NODE_URL, optionally
//!     // ETH_CONTRACT_ADDRESS and ETH_CONTRACT_ABI
//!     let explorer = Explorer::from_env()?;
//!
//!     let address: Address = "0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce".parse()?;
//!     let block: BlockReference = "12000000".parse()?;
//!
//!     // Prints "[BALANCE-RESULTS] Eth balance of address ... at block 12000000: 0x... $ETH"
//!     explorer.eth_balance(&address, &block).await?;
//!
//!     // Contract view methods are called by name
//!     explorer.call_method("totalSupply", &block).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Core Types
//!
//! - [`Explorer`] - The query façade
//! - [`FallbackExecutor`] - Full-node-first execution with archive fallback
//! - [`ChainProvider`] - Read-only chain access, implemented by [`RpcClient`]
//! - [`MethodCatalog`] - View methods of a contract ABI
//! - [`Address`], [`BlockReference`], [`U256`] - Query parameters, with
//!   [`Address`], [`U256`] and [`Bytes`] from `alloy-primitives`
//!
//! # String Parsing
//!
//! Query parameters parse from the strings an operator types:
//!
//! ```
//! use archive_kit::{Address, BlockReference, U256};
//!
//! let address: Address = "95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce".parse().unwrap();
//! let block: BlockReference = "latest".parse().unwrap();
//! let position: U256 = "0x2".parse().unwrap();
//!
//! // Addresses display with their EIP-55 checksum.
//! assert_eq!(address.to_string(), "0x95aD61b0a150d79219dCF64E1E6Cc01f0B64C4cE");
//! assert_eq!(block, BlockReference::Latest);
//! assert_eq!(position, U256::from(2u64));
//! ```

pub mod client;
pub mod contract;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{AbiError, Error, RpcError};
pub use types::*;

// Re-export contract types
pub use contract::{
    CallOutput, Contract, DynSolType, DynSolValue, InputDescriptor, MethodCatalog,
    MethodDescriptor,
};

// Re-export client types
pub use client::{
    ChainProvider, ErrorClass, ErrorClassifier, Explorer, ExplorerBuilder, FallbackExecutor,
    INVALID_QUERY, MemoryReporter, NodeRole, PrunedStateClassifier, ProviderFuture,
    ProviderHandle, Reporter, RpcClient, StdoutReporter,
};
