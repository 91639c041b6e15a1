//! Report lines produced by the façade.

use archive_kit::*;
use serde_json::json;

use crate::mock::*;

#[tokio::test]
async fn test_balance_timeout_reports_invalid_query() {
    let h = Harness::new(
        full().fail("eth_getBalance", "timeout"),
        archive().respond("eth_getBalance", json!("0x1")),
    );

    let result = h
        .explorer
        .eth_balance(&holder(), &BlockReference::Latest)
        .await;

    assert!(matches!(result, Err(Error::Rpc(RpcError::Rpc { .. }))));
    assert_eq!(h.reporter.lines(), vec![INVALID_QUERY]);
    assert!(h.archive.calls().is_empty());
}

#[tokio::test]
async fn test_storage_fallback_reports_archive_value() {
    let h = Harness::new(
        full().fail("eth_getStorageAt", "missing trie node abc..."),
        archive().respond("eth_getStorageAt", json!("0x01")),
    );

    h.explorer
        .storage_at(&token_address(), &U256::from(5u64), &BlockReference::Number(100))
        .await
        .unwrap();

    assert_eq!(
        h.reporter.lines(),
        vec![
            "[STORAGE-RESULTS] Storage at address 0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce at position 5 at block 100: 0x01"
        ]
    );
}

#[tokio::test]
async fn test_balance_line_keeps_raw_value() {
    let h = Harness::new(full().respond("eth_getBalance", json!("0xde0b6b3a7640000")), archive());

    h.explorer
        .eth_balance(&holder(), &BlockReference::Number(15_000_000))
        .await
        .unwrap();

    assert_eq!(
        h.reporter.lines(),
        vec![
            "[BALANCE-RESULTS] Eth balance of address 0x28c6c06298d514db089934071355e5743bf21d60 at block 15000000: 0xde0b6b3a7640000 $ETH"
        ]
    );
}

#[tokio::test]
async fn test_code_line() {
    let h = Harness::new(full().respond("eth_getCode", json!("0x6080")), archive());

    h.explorer
        .code_at(&token_address(), &BlockReference::Latest)
        .await
        .unwrap();

    assert_eq!(
        h.reporter.lines(),
        vec!["[CODE-RESULTS] Code at address 0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce at block latest: 0x6080"]
    );
}

#[tokio::test]
async fn test_block_line_lists_transactions() {
    let h = Harness::new(
        full().respond(
            "eth_getBlockByNumber",
            json!({
                "number": "0x64",
                "hash": "0x01",
                "parentHash": "0x00",
                "timestamp": "0x0",
                "transactions": ["0xaaaa"]
            }),
        ),
        archive(),
    );

    h.explorer
        .block_transactions(&BlockReference::Number(100), false)
        .await
        .unwrap();

    let lines = h.reporter.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("[TRANSACTIONS] Transactions at block 100:\n"));
    assert!(lines[0].contains("\"0xaaaa\""));
}

#[tokio::test]
async fn test_chain_failures_report_invalid_query() {
    let h = Harness::new(
        full()
            .fail("eth_getStorageAt", "header not found")
            .fail("eth_getCode", "connection refused")
            .fail("eth_getBlockByNumber", "timeout"),
        archive(),
    );
    let block = BlockReference::Number(1);

    assert!(h.explorer.storage_at(&token_address(), &U256::ZERO, &block).await.is_err());
    assert!(h.explorer.code_at(&token_address(), &block).await.is_err());
    assert!(h.explorer.block_transactions(&block, true).await.is_err());

    assert_eq!(h.reporter.lines(), vec![INVALID_QUERY; 3]);
    assert!(h.reporter.errors().is_empty());
}

#[tokio::test]
async fn test_contract_call_line() {
    let h = Harness::new(full().respond("eth_call", json!(word(21_000_000))), archive());

    h.explorer
        .call_method("totalSupply", &BlockReference::Number(9))
        .await
        .unwrap();

    assert_eq!(
        h.reporter.lines(),
        vec!["[totalSupply-RESULT] Results from calling totalSupply method on block 9: 21000000"]
    );
}

#[tokio::test]
async fn test_contract_failure_logs_without_result_line() {
    let h = Harness::new(full().fail("eth_call", "execution reverted"), archive());

    let err = h
        .explorer
        .call_method("totalSupply", &BlockReference::Latest)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Rpc(_)));
    assert!(h.reporter.lines().is_empty());
    let errors = h.reporter.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("totalSupply"));
    assert!(errors[0].contains("execution reverted"));
}
