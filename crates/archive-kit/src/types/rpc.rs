//! RPC response types.
//!
//! Quantities and hashes are kept as the hex strings the node returned so
//! they can be reported without re-encoding. Fields the explorer does not
//! look at are preserved in `other` and survive a serialize round trip.

use serde::{Deserialize, Serialize};

/// Block returned by `eth_getBlockByNumber`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockView {
    /// Block number as a hex quantity. `None` for a pending block.
    #[serde(default)]
    pub number: Option<String>,
    /// Block hash. `None` for a pending block.
    #[serde(default)]
    pub hash: Option<String>,
    /// Parent block hash.
    pub parent_hash: String,
    /// Block timestamp as a hex quantity.
    pub timestamp: String,
    /// Fee recipient.
    #[serde(default)]
    pub miner: Option<String>,
    /// Gas used as a hex quantity.
    #[serde(default)]
    pub gas_used: Option<String>,
    /// Transactions, as hashes or full objects depending on the request.
    #[serde(default)]
    pub transactions: BlockTransactions,
    /// Remaining header fields, preserved verbatim.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// Transactions included in a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockTransactions {
    /// Transaction hashes only.
    Hashes(Vec<String>),
    /// Full transaction objects.
    Full(Vec<TransactionView>),
}

impl Default for BlockTransactions {
    fn default() -> Self {
        Self::Hashes(Vec::new())
    }
}

impl BlockTransactions {
    /// Number of transactions.
    pub fn len(&self) -> usize {
        match self {
            Self::Hashes(hashes) => hashes.len(),
            Self::Full(txs) => txs.len(),
        }
    }

    /// Check if the block has no transactions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Transaction hashes, whichever form the block was fetched in.
    pub fn hashes(&self) -> Vec<&str> {
        match self {
            Self::Hashes(hashes) => hashes.iter().map(String::as_str).collect(),
            Self::Full(txs) => txs.iter().map(|tx| tx.hash.as_str()).collect(),
        }
    }
}

/// A transaction object as returned inside a full block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    /// Transaction hash.
    pub hash: String,
    /// Sender.
    pub from: String,
    /// Recipient. `None` for contract creation.
    #[serde(default)]
    pub to: Option<String>,
    /// Transferred value as a hex quantity.
    pub value: String,
    /// Call data.
    #[serde(default)]
    pub input: Option<String>,
    /// Sender nonce as a hex quantity.
    pub nonce: String,
    /// Remaining transaction fields, preserved verbatim.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}
