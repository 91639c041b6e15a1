//! Provider abstraction and role-tagged handles.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::RpcError;
use crate::types::{Address, BlockReference, BlockView, Bytes, U256};

use super::rpc::RpcClient;

/// Boxed future returned by [`ChainProvider`] methods.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RpcError>> + Send + 'a>>;

/// Read-only chain access required by the explorer.
///
/// [`RpcClient`] is the production implementation. Tests substitute
/// recording mocks through [`Explorer::with_providers`](crate::Explorer::with_providers).
pub trait ChainProvider: Send + Sync {
    /// Endpoint identity, used in logs.
    fn url(&self) -> &str;

    /// Current block number.
    fn block_number(&self) -> ProviderFuture<'_, u64>;

    /// Balance as the node's hex quantity.
    fn balance<'a>(
        &'a self,
        address: &'a Address,
        block: &'a BlockReference,
    ) -> ProviderFuture<'a, String>;

    /// Storage word as returned by the node.
    fn storage_at<'a>(
        &'a self,
        address: &'a Address,
        position: &'a U256,
        block: &'a BlockReference,
    ) -> ProviderFuture<'a, String>;

    /// Bytecode as returned by the node.
    fn code_at<'a>(
        &'a self,
        address: &'a Address,
        block: &'a BlockReference,
    ) -> ProviderFuture<'a, String>;

    /// Block with transaction hashes or full transaction objects.
    fn block<'a>(
        &'a self,
        block: &'a BlockReference,
        full_transactions: bool,
    ) -> ProviderFuture<'a, BlockView>;

    /// Read-only message call against a contract.
    fn call<'a>(
        &'a self,
        to: &'a Address,
        data: &'a [u8],
        block: &'a BlockReference,
    ) -> ProviderFuture<'a, Bytes>;
}

impl ChainProvider for RpcClient {
    fn url(&self) -> &str {
        RpcClient::url(self)
    }

    fn block_number(&self) -> ProviderFuture<'_, u64> {
        Box::pin(RpcClient::block_number(self))
    }

    fn balance<'a>(
        &'a self,
        address: &'a Address,
        block: &'a BlockReference,
    ) -> ProviderFuture<'a, String> {
        Box::pin(self.get_balance(address, block))
    }

    fn storage_at<'a>(
        &'a self,
        address: &'a Address,
        position: &'a U256,
        block: &'a BlockReference,
    ) -> ProviderFuture<'a, String> {
        Box::pin(self.get_storage_at(address, position, block))
    }

    fn code_at<'a>(
        &'a self,
        address: &'a Address,
        block: &'a BlockReference,
    ) -> ProviderFuture<'a, String> {
        Box::pin(self.get_code(address, block))
    }

    fn block<'a>(
        &'a self,
        block: &'a BlockReference,
        full_transactions: bool,
    ) -> ProviderFuture<'a, BlockView> {
        Box::pin(self.get_block_by_number(block, full_transactions))
    }

    fn call<'a>(
        &'a self,
        to: &'a Address,
        data: &'a [u8],
        block: &'a BlockReference,
    ) -> ProviderFuture<'a, Bytes> {
        Box::pin(self.eth_call(to, data, block))
    }
}

impl<P: ChainProvider + ?Sized> ChainProvider for Arc<P> {
    fn url(&self) -> &str {
        (**self).url()
    }

    fn block_number(&self) -> ProviderFuture<'_, u64> {
        (**self).block_number()
    }

    fn balance<'a>(
        &'a self,
        address: &'a Address,
        block: &'a BlockReference,
    ) -> ProviderFuture<'a, String> {
        (**self).balance(address, block)
    }

    fn storage_at<'a>(
        &'a self,
        address: &'a Address,
        position: &'a U256,
        block: &'a BlockReference,
    ) -> ProviderFuture<'a, String> {
        (**self).storage_at(address, position, block)
    }

    fn code_at<'a>(
        &'a self,
        address: &'a Address,
        block: &'a BlockReference,
    ) -> ProviderFuture<'a, String> {
        (**self).code_at(address, block)
    }

    fn block<'a>(
        &'a self,
        block: &'a BlockReference,
        full_transactions: bool,
    ) -> ProviderFuture<'a, BlockView> {
        (**self).block(block, full_transactions)
    }

    fn call<'a>(
        &'a self,
        to: &'a Address,
        data: &'a [u8],
        block: &'a BlockReference,
    ) -> ProviderFuture<'a, Bytes> {
        (**self).call(to, data, block)
    }
}

// ============================================================================
// ProviderHandle
// ============================================================================

/// Which side of the fallback pair a provider serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Primary node retaining only recent state.
    Full,
    /// Secondary node retaining all historical state.
    Archive,
}

impl NodeRole {
    /// Lowercase name for log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Full => "full",
            NodeRole::Archive => "archive",
        }
    }
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider tagged with its role. Immutable after construction.
#[derive(Clone, Debug)]
pub struct ProviderHandle<P> {
    role: NodeRole,
    provider: P,
}

impl<P: ChainProvider> ProviderHandle<P> {
    /// Wrap a provider as the full (primary) node.
    pub fn full(provider: P) -> Self {
        Self {
            role: NodeRole::Full,
            provider,
        }
    }

    /// Wrap a provider as the archive (secondary) node.
    pub fn archive(provider: P) -> Self {
        Self {
            role: NodeRole::Archive,
            provider,
        }
    }

    /// The role this handle plays.
    pub fn role(&self) -> NodeRole {
        self.role
    }

    /// The endpoint URL.
    pub fn url(&self) -> &str {
        self.provider.url()
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}
