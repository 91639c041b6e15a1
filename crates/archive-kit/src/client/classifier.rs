//! Classification of provider failures.
//!
//! The classifier decides whether a failed query should be re-run against
//! the archive node. The default rule is narrow: only the
//! full-node error text for pruned historical state triggers a fallback.
//! A node that words the error differently produces a false negative, and
//! the query fails without touching the archive node.

use crate::error::RpcError;

/// Substring full nodes put in errors for state they no longer retain.
pub const PRUNED_STATE_INDICATOR: &str = "missing trie node";

/// Outcome of classifying a provider error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The requested state was pruned from the node.
    StatePruned,
    /// Any other failure.
    Other,
}

/// Decides whether a provider error means pruned state.
pub trait ErrorClassifier: Send + Sync {
    /// Classify a failed call's error.
    fn classify(&self, error: &RpcError) -> ErrorClass;
}

/// Returns true if an error message indicates pruned state.
pub fn is_pruned_state_error(message: &str) -> bool {
    message.contains(PRUNED_STATE_INDICATOR)
}

/// Default classifier: matches [`PRUNED_STATE_INDICATOR`] in the error message.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrunedStateClassifier;

impl ErrorClassifier for PrunedStateClassifier {
    fn classify(&self, error: &RpcError) -> ErrorClass {
        if is_pruned_state_error(&error.to_string()) {
            ErrorClass::StatePruned
        } else {
            ErrorClass::Other
        }
    }
}

impl<F> ErrorClassifier for F
where
    F: Fn(&RpcError) -> ErrorClass + Send + Sync,
{
    fn classify(&self, error: &RpcError) -> ErrorClass {
        self(error)
    }
}
