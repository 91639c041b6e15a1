//! Block reference types for RPC queries.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::ParseBlockReferenceError;

/// Reference to a specific block for RPC queries.
///
/// Every state query is answered against the state at one block. Old block
/// numbers are the ones a pruning full node can no longer serve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockReference {
    /// The most recent block.
    #[default]
    Latest,
    /// The genesis block.
    Earliest,
    /// The pending block being built by the node.
    Pending,
    /// The latest safe head block.
    Safe,
    /// The latest finalized block.
    Finalized,
    /// A specific block number.
    Number(u64),
}

impl BlockReference {
    /// Query at a specific block number.
    pub fn at_height(height: u64) -> Self {
        Self::Number(height)
    }

    /// Returns the block number if this is a numbered reference.
    pub fn number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Convert to the JSON-RPC block parameter (`"latest"`, `"0x1b4"`, ...).
    pub fn to_rpc_param(&self) -> serde_json::Value {
        match self {
            BlockReference::Number(n) => serde_json::Value::String(format!("0x{n:x}")),
            tag => serde_json::Value::String(tag.tag_str().to_string()),
        }
    }

    fn tag_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Earliest => "earliest",
            Self::Pending => "pending",
            Self::Safe => "safe",
            Self::Finalized => "finalized",
            Self::Number(_) => "number",
        }
    }
}

impl FromStr for BlockReference {
    type Err = ParseBlockReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let reference = match trimmed.to_ascii_lowercase().as_str() {
            "" | "latest" => Self::Latest,
            "earliest" => Self::Earliest,
            "pending" => Self::Pending,
            "safe" => Self::Safe,
            "finalized" => Self::Finalized,
            other => {
                let number = match other.strip_prefix("0x") {
                    Some(hex) => u64::from_str_radix(hex, 16),
                    None => other.parse::<u64>(),
                };
                Self::Number(number.map_err(|_| ParseBlockReferenceError(s.to_string()))?)
            }
        };
        Ok(reference)
    }
}

impl Display for BlockReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            tag => f.write_str(tag.tag_str()),
        }
    }
}

impl From<u64> for BlockReference {
    fn from(height: u64) -> Self {
        Self::Number(height)
    }
}
