//! Query descriptions.
//!
//! These carry the parameters of one user-initiated query. Their `Display`
//! output is the intent line logged before the query is dispatched.

use std::fmt::{self, Display};

use super::{Address, BlockReference, U256};

/// A chain-level state query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainQuery {
    /// Ether balance of an address.
    Balance {
        address: Address,
        block: BlockReference,
    },
    /// One storage slot of an address.
    StorageAt {
        address: Address,
        position: U256,
        block: BlockReference,
    },
    /// Deployed bytecode of an address.
    CodeAt {
        address: Address,
        block: BlockReference,
    },
    /// Transactions mined in a block.
    BlockTransactions {
        block: BlockReference,
        full_transactions: bool,
    },
}

impl ChainQuery {
    /// The block the query reads state at.
    pub fn block(&self) -> BlockReference {
        match self {
            Self::Balance { block, .. }
            | Self::StorageAt { block, .. }
            | Self::CodeAt { block, .. }
            | Self::BlockTransactions { block, .. } => *block,
        }
    }

    /// Short operation name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Balance { .. } => "balance",
            Self::StorageAt { .. } => "storage",
            Self::CodeAt { .. } => "code",
            Self::BlockTransactions { .. } => "block",
        }
    }
}

impl Display for ChainQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Balance { address, block } => {
                write!(f, "Fetching ETH balance from address {address} at block {block}")
            }
            Self::StorageAt {
                address,
                position,
                block,
            } => write!(
                f,
                "Fetching storage at position {position} from address {address} at block {block}"
            ),
            Self::CodeAt { address, block } => {
                write!(f, "Fetching code at address {address} at block {block}")
            }
            Self::BlockTransactions {
                block,
                full_transactions,
            } => {
                let detail = if *full_transactions { "full" } else { "hashes of" };
                write!(f, "Fetching {detail} block {block} transactions")
            }
        }
    }
}

/// A read-only contract method invocation.
///
/// Arguments are positional and must match the method's declared inputs
/// in number and order.
#[derive(Clone, Debug, PartialEq)]
pub struct ContractCall {
    /// Method name as it appears in the catalog.
    pub method: String,
    /// Argument values in declaration order.
    pub args: Vec<serde_json::Value>,
    /// Block to read state at.
    pub block: BlockReference,
}

impl ContractCall {
    /// Create a call with arguments.
    pub fn new(
        method: impl Into<String>,
        args: Vec<serde_json::Value>,
        block: BlockReference,
    ) -> Self {
        Self {
            method: method.into(),
            args,
            block,
        }
    }

    /// Create a call to a method without inputs.
    pub fn without_args(method: impl Into<String>, block: BlockReference) -> Self {
        Self::new(method, Vec::new(), block)
    }
}

impl Display for ContractCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Calling {} method on block {}", self.method, self.block)?;
        if !self.args.is_empty() {
            let args: Vec<String> = self.args.iter().map(|a| a.to_string()).collect();
            write!(f, " with arguments ({})", args.join(", "))?;
        }
        Ok(())
    }
}
