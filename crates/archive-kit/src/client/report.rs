//! Sinks for query result lines.

use std::sync::Mutex;

use crate::types::{Address, BlockReference, BlockTransactions, U256};

/// Text reported when a chain-level query yields no value.
pub const INVALID_QUERY: &str = "Invalid query";

/// Receives the human-readable outcome of each query.
pub trait Reporter: Send + Sync {
    /// A result line.
    fn line(&self, line: &str);

    /// A failure description.
    fn error(&self, message: &str);
}

/// Writes result lines to stdout and failures to stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn line(&self, line: &str) {
        println!("{line}");
    }

    fn error(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Keeps every reported line in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl MemoryReporter {
    /// Create an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Result lines reported so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Failures reported so far.
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl Reporter for MemoryReporter {
    fn line(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }

    fn error(&self, message: &str) {
        if let Ok(mut errors) = self.errors.lock() {
            errors.push(message.to_string());
        }
    }
}

// ============================================================================
// Line formats
// ============================================================================

// Addresses are written as lowercase hex, not checksummed.

pub(crate) fn balance_line(address: &Address, block: &BlockReference, value: &str) -> String {
    format!("[BALANCE-RESULTS] Eth balance of address {address:#x} at block {block}: {value} $ETH")
}

pub(crate) fn storage_line(
    address: &Address,
    position: &U256,
    block: &BlockReference,
    value: &str,
) -> String {
    format!(
        "[STORAGE-RESULTS] Storage at address {address:#x} at position {position} at block {block}: {value}"
    )
}

pub(crate) fn code_line(address: &Address, block: &BlockReference, value: &str) -> String {
    format!("[CODE-RESULTS] Code at address {address:#x} at block {block}: {value}")
}

/// Header line followed by the block's transactions as pretty JSON.
pub(crate) fn transactions_line(block: &BlockReference, transactions: &BlockTransactions) -> String {
    let transactions = serde_json::to_string_pretty(transactions)
        .unwrap_or_else(|_| "[]".to_string());
    format!("[TRANSACTIONS] Transactions at block {block}:\n{transactions}")
}

pub(crate) fn method_line(method: &str, block: &BlockReference, value: &str) -> String {
    format!("[{method}-RESULT] Results from calling {method} method on block {block}: {value}")
}
