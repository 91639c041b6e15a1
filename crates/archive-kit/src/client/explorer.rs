//! The query façade: one entry point per query shape.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::contract::{CallOutput, Contract, MethodCatalog, encode_method_call};
use crate::error::{Error, RpcError};
use crate::types::{Address, BlockReference, BlockView, ChainQuery, ContractAbi, ContractCall, U256};

use super::classifier::ErrorClassifier;
use super::fallback::FallbackExecutor;
use super::provider::ChainProvider;
use super::report::{self, INVALID_QUERY, Reporter, StdoutReporter};
use super::rpc::RpcClient;

/// Environment variable holding the full node URL.
pub const FULL_NODE_URL_ENV: &str = "ETH_FULL_NODE_URL";
/// Environment variable holding the archive node URL.
pub const ARCHIVE_NODE_URL_ENV: &str = "ETH_ARCHIVE_NODE_URL";
/// Environment variable holding the contract address.
pub const CONTRACT_ADDRESS_ENV: &str = "ETH_CONTRACT_ADDRESS";
/// Environment variable holding the path to the contract's ABI JSON.
pub const CONTRACT_ABI_ENV: &str = "ETH_CONTRACT_ABI";

/// Explorer over a full node with archive fallback.
///
/// Every query logs its intent, runs through the [`FallbackExecutor`] and
/// reports the outcome to the configured [`Reporter`]. A chain-level query
/// that fails reports [`INVALID_QUERY`]; a contract call that fails logs the
/// error and reports it on the error channel. Either way the caller gets
/// the error back.
///
/// # Example
///
/// ```rust,no_run
/// use archive_kit::*;
///
/// #[tokio::main]
/// async fn main() -> Result<(), archive_kit::Error> {
///     let explorer = Explorer::builder(
///         "https://full.example.com",
///         "https://archive.example.com",
///     )
///     .build()?;
///
///     let address: Address = "0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce".parse()?;
///     let balance = explorer
///         .eth_balance(&address, &BlockReference::Number(12_000_000))
///         .await?;
///     println!("{balance}");
///     Ok(())
/// }
/// ```
pub struct Explorer<P = RpcClient> {
    executor: FallbackExecutor<P>,
    contract: Option<Contract>,
    reporter: Arc<dyn Reporter>,
}

impl Explorer<RpcClient> {
    /// Create a builder for JSON-RPC endpoints.
    pub fn builder(full_url: impl Into<String>, archive_url: impl Into<String>) -> ExplorerBuilder {
        ExplorerBuilder::new(full_url, archive_url)
    }

    /// Create an explorer from environment variables.
    ///
    /// Reads:
    /// - `ETH_FULL_NODE_URL` (required)
    /// - `ETH_ARCHIVE_NODE_URL` (required)
    /// - `ETH_CONTRACT_ADDRESS` and `ETH_CONTRACT_ABI` (optional, both or
    ///   neither): the contract whose view methods can be called, and the
    ///   path to its ABI JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a required variable is missing or only one
    /// of the contract variables is set, and a parse or ABI error if the
    /// address is malformed or the ABI file cannot be read.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("{key} is not set")))
        };

        let mut builder = Self::builder(required(FULL_NODE_URL_ENV)?, required(ARCHIVE_NODE_URL_ENV)?);

        match (lookup(CONTRACT_ADDRESS_ENV), lookup(CONTRACT_ABI_ENV)) {
            (Some(address), Some(abi_path)) => {
                let abi = ContractAbi::from_file(&abi_path)?;
                builder = builder.contract(address.parse::<Address>()?, abi);
            }
            (Some(_), None) => {
                return Err(Error::Config(format!(
                    "{CONTRACT_ADDRESS_ENV} is set but {CONTRACT_ABI_ENV} is missing"
                )));
            }
            (None, Some(_)) => {
                return Err(Error::Config(format!(
                    "{CONTRACT_ABI_ENV} is set but {CONTRACT_ADDRESS_ENV} is missing"
                )));
            }
            (None, None) => {}
        }

        builder.build()
    }
}

impl<P: ChainProvider> Explorer<P> {
    /// Create an explorer over arbitrary providers, reporting to stdout and
    /// with no contract configured.
    pub fn with_providers(full: P, archive: P) -> Self {
        Self {
            executor: FallbackExecutor::new(full, archive),
            contract: None,
            reporter: Arc::new(StdoutReporter),
        }
    }

    /// Set the contract whose view methods can be called.
    pub fn with_contract(mut self, contract: Contract) -> Self {
        self.contract = Some(contract);
        self
    }

    /// Set the sink for result lines.
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replace the rule deciding when to fall back to the archive node.
    pub fn with_classifier(self, classifier: impl ErrorClassifier + 'static) -> Self {
        Self {
            executor: self.executor.with_classifier(classifier),
            ..self
        }
    }

    /// The fallback executor over the full and archive nodes.
    pub fn executor(&self) -> &FallbackExecutor<P> {
        &self.executor
    }

    /// The configured contract, if any.
    pub fn contract(&self) -> Option<&Contract> {
        self.contract.as_ref()
    }

    /// View methods of the configured contract.
    pub fn catalog(&self) -> Option<&MethodCatalog> {
        self.contract.as_ref().map(Contract::catalog)
    }

    // ========================================================================
    // Chain-level queries
    // ========================================================================

    /// Current block number, the default block for prompts.
    pub async fn current_block(&self) -> Result<u64, Error> {
        tracing::info!("Fetching current block number");
        Ok(self.executor.execute(|node| node.block_number()).await?)
    }

    /// Ether balance of `address` at `block`, as the node's hex quantity.
    pub async fn eth_balance(&self, address: &Address, block: &BlockReference) -> Result<String, Error> {
        let query = ChainQuery::Balance {
            address: *address,
            block: *block,
        };
        self.chain_query(
            &query,
            |node| node.balance(address, block),
            |value| report::balance_line(address, block, value),
        )
        .await
    }

    /// Storage word of `address` at `position` and `block`.
    pub async fn storage_at(
        &self,
        address: &Address,
        position: &U256,
        block: &BlockReference,
    ) -> Result<String, Error> {
        let query = ChainQuery::StorageAt {
            address: *address,
            position: *position,
            block: *block,
        };
        self.chain_query(
            &query,
            |node| node.storage_at(address, position, block),
            |value| report::storage_line(address, position, block, value),
        )
        .await
    }

    /// Bytecode deployed at `address` as of `block`.
    pub async fn code_at(&self, address: &Address, block: &BlockReference) -> Result<String, Error> {
        let query = ChainQuery::CodeAt {
            address: *address,
            block: *block,
        };
        self.chain_query(
            &query,
            |node| node.code_at(address, block),
            |value| report::code_line(address, block, value),
        )
        .await
    }

    /// Transactions of `block`, as hashes or full objects.
    pub async fn block_transactions(
        &self,
        block: &BlockReference,
        full_transactions: bool,
    ) -> Result<BlockView, Error> {
        let query = ChainQuery::BlockTransactions {
            block: *block,
            full_transactions,
        };
        self.chain_query(
            &query,
            |node| node.block(block, full_transactions),
            |view: &BlockView| report::transactions_line(block, &view.transactions),
        )
        .await
    }

    async fn chain_query<'a, T, F, Fut>(
        &'a self,
        query: &ChainQuery,
        op: F,
        line: impl FnOnce(&T) -> String,
    ) -> Result<T, Error>
    where
        F: Fn(&'a P) -> Fut,
        Fut: Future<Output = Result<T, RpcError>>,
    {
        tracing::info!(kind = query.kind(), block = %query.block(), "{query}");

        match self.executor.execute(op).await {
            Ok(value) => {
                self.reporter.line(&line(&value));
                Ok(value)
            }
            Err(error) => {
                tracing::debug!(kind = query.kind(), error = %error, "chain query failed");
                self.reporter.line(INVALID_QUERY);
                Err(error.into())
            }
        }
    }

    // ========================================================================
    // Contract calls
    // ========================================================================

    /// Call a view method that takes no arguments.
    pub async fn call_method(&self, method: &str, block: &BlockReference) -> Result<CallOutput, Error> {
        self.call(&ContractCall::without_args(method, *block)).await
    }

    /// Call a view method with positional arguments.
    pub async fn call_method_with_args(
        &self,
        method: &str,
        args: &[Value],
        block: &BlockReference,
    ) -> Result<CallOutput, Error> {
        self.call(&ContractCall::new(method, args.to_vec(), *block)).await
    }

    /// Execute a view call on the configured contract.
    ///
    /// Unknown method names, argument mismatches, unsupported ABI types and a
    /// missing contract fail before any network request.
    pub async fn call(&self, call: &ContractCall) -> Result<CallOutput, Error> {
        tracing::info!(method = %call.method, block = %call.block, "{call}");

        match self.try_call(call).await {
            Ok(output) => {
                self.reporter
                    .line(&report::method_line(&call.method, &call.block, &output.to_string()));
                Ok(output)
            }
            Err(error) => {
                tracing::error!(
                    method = %call.method,
                    block = %call.block,
                    error = %error,
                    "contract call failed"
                );
                self.reporter
                    .error(&format!("Error calling {} method: {error}", call.method));
                Err(error)
            }
        }
    }

    async fn try_call(&self, call: &ContractCall) -> Result<CallOutput, Error> {
        let contract = self.contract.as_ref().ok_or(Error::NoContract)?;
        let method = contract.method(&call.method)?;
        let data = encode_method_call(method, &call.args)?;
        let outputs = method.output_types()?;
        let to = contract.address();

        let raw = self
            .executor
            .execute(|node| node.call(to, &data, &call.block))
            .await?;

        Ok(CallOutput::decode_as(&method.name, &outputs, raw)?)
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for Explorer<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer")
            .field("executor", &self.executor)
            .field("contract", &self.contract.as_ref().map(Contract::address))
            .finish()
    }
}

/// Builder for an [`Explorer`] over JSON-RPC endpoints.
///
/// # Example
///
/// ```rust,ignore
/// use archive_kit::*;
///
/// let explorer = Explorer::builder(full_url, archive_url)
///     .contract(address, ContractAbi::from_file("erc20.json")?)
///     .reporter(Arc::new(MemoryReporter::new()))
///     .build()?;
/// ```
pub struct ExplorerBuilder {
    full_url: String,
    archive_url: String,
    contract: Option<(Address, ContractAbi)>,
    classifier: Option<Arc<dyn ErrorClassifier>>,
    reporter: Arc<dyn Reporter>,
}

impl ExplorerBuilder {
    fn new(full_url: impl Into<String>, archive_url: impl Into<String>) -> Self {
        Self {
            full_url: full_url.into(),
            archive_url: archive_url.into(),
            contract: None,
            classifier: None,
            reporter: Arc::new(StdoutReporter),
        }
    }

    /// Set the contract whose view methods can be called.
    pub fn contract(mut self, address: Address, abi: ContractAbi) -> Self {
        self.contract = Some((address, abi));
        self
    }

    /// Replace the rule deciding when to fall back to the archive node.
    pub fn classifier(mut self, classifier: impl ErrorClassifier + 'static) -> Self {
        self.classifier = Some(Arc::new(classifier));
        self
    }

    /// Set the sink for result lines. Defaults to [`StdoutReporter`].
    pub fn reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Build the explorer.
    ///
    /// Fails if a URL is empty.
    pub fn build(self) -> Result<Explorer, Error> {
        for (name, url) in [("full node", &self.full_url), ("archive node", &self.archive_url)] {
            if url.trim().is_empty() {
                return Err(Error::Config(format!("{name} URL is empty")));
            }
        }

        let contract = self
            .contract
            .map(|(address, abi)| Contract::new(address, abi));

        let mut executor = FallbackExecutor::new(
            RpcClient::new(self.full_url),
            RpcClient::new(self.archive_url),
        );
        if let Some(classifier) = self.classifier {
            executor = executor.with_shared_classifier(classifier);
        }

        Ok(Explorer {
            executor,
            contract,
            reporter: self.reporter,
        })
    }
}
