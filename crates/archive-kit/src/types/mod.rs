//! Core types for EVM state queries.
//!
//! Addresses, 256-bit words and byte strings come from `alloy-primitives`;
//! the block and transaction views keep exactly what the explorer reads from
//! a JSON-RPC node.

mod abi;
mod block_reference;
mod query;
mod rpc;

pub use abi::ContractAbi;
pub use alloy_primitives::{Address, Bytes, U256};
pub use block_reference::BlockReference;
pub use query::{ChainQuery, ContractCall};
pub use rpc::{BlockTransactions, BlockView, TransactionView};
