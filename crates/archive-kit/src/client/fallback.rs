//! Full-node-first query execution with archive fallback.

use std::future::Future;
use std::sync::Arc;

use crate::error::RpcError;

use super::classifier::{ErrorClass, ErrorClassifier, PrunedStateClassifier};
use super::provider::{ChainProvider, ProviderHandle};

/// Runs a query against the full node, falling back to the archive node
/// when the full node has pruned the requested state.
///
/// The policy is fixed:
///
/// 1. The query runs against the full node.
/// 2. A success is returned as-is and the archive node is never contacted.
/// 3. A failure classified [`ErrorClass::StatePruned`] re-runs the identical
///    query once against the archive node, and that result is final.
/// 4. Any other failure is returned without contacting the archive node.
///
/// There is no backoff and never more than one fallback.
///
/// # Example
///
/// ```rust,no_run
/// # use archive_kit::*;
/// # async fn example() -> Result<(), RpcError> {
/// let executor = FallbackExecutor::new(
///     RpcClient::new("https://full.example.com"),
///     RpcClient::new("https://archive.example.com"),
/// );
/// let address: Address = "0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce".parse().unwrap();
/// let block = BlockReference::Number(1_000_000);
/// let balance = executor.execute(|node| node.balance(&address, &block)).await?;
/// # Ok(())
/// # }
/// ```
pub struct FallbackExecutor<P> {
    full: ProviderHandle<P>,
    archive: ProviderHandle<P>,
    classifier: Arc<dyn ErrorClassifier>,
}

impl<P: ChainProvider> FallbackExecutor<P> {
    /// Create an executor over a full node and an archive node, using the
    /// default [`PrunedStateClassifier`].
    pub fn new(full: P, archive: P) -> Self {
        Self {
            full: ProviderHandle::full(full),
            archive: ProviderHandle::archive(archive),
            classifier: Arc::new(PrunedStateClassifier),
        }
    }

    /// Replace the error classifier.
    pub fn with_classifier(self, classifier: impl ErrorClassifier + 'static) -> Self {
        self.with_shared_classifier(Arc::new(classifier))
    }

    pub(crate) fn with_shared_classifier(mut self, classifier: Arc<dyn ErrorClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// The full (primary) node.
    pub fn full(&self) -> &ProviderHandle<P> {
        &self.full
    }

    /// The archive (secondary) node.
    pub fn archive(&self) -> &ProviderHandle<P> {
        &self.archive
    }

    /// Run `op` against the full node, re-running it against the archive node
    /// if the failure is classified as pruned state.
    pub async fn execute<'a, T, F, Fut>(&'a self, op: F) -> Result<T, RpcError>
    where
        F: Fn(&'a P) -> Fut,
        Fut: Future<Output = Result<T, RpcError>>,
    {
        tracing::debug!(node = %self.full.role(), url = %self.full.url(), "attempting query");

        let error = match op(self.full.provider()).await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        match self.classifier.classify(&error) {
            ErrorClass::StatePruned => {
                tracing::warn!(
                    node = %self.archive.role(),
                    url = %self.archive.url(),
                    error = %error,
                    "state pruned on full node, switching to archive query"
                );
                op(self.archive.provider()).await
            }
            ErrorClass::Other => {
                tracing::debug!(node = %self.full.role(), error = %error, "query failed");
                Err(error)
            }
        }
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for FallbackExecutor<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackExecutor")
            .field("full", &self.full)
            .field("archive", &self.archive)
            .finish()
    }
}
