//! View-method catalog and argument handling through the façade.

use archive_kit::*;
use serde_json::json;

use crate::mock::*;

#[test]
fn test_catalog_lists_view_methods() {
    let contract = token_contract();
    let catalog = contract.catalog();

    assert_eq!(catalog.names(), vec!["totalSupply", "balanceOf", "name"]);
    assert!(catalog.inputs(0).unwrap().is_empty());
    let inputs = catalog.inputs(1).unwrap();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].name, "who");
    assert_eq!(inputs[0].ty, "address");
    assert_eq!(
        inputs[0].placeholder(),
        json!("0x0000000000000000000000000000000000000000")
    );
}

#[tokio::test]
async fn test_unknown_method_fails_before_network() {
    let h = Harness::new(full().respond("eth_call", json!(word(1))), archive());

    let err = h
        .explorer
        .call_method("transfer", &BlockReference::Latest)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnknownMethod(name) if name == "transfer"));
    assert!(h.full.calls().is_empty());
    assert!(h.reporter.lines().is_empty());
    assert_eq!(h.reporter.errors().len(), 1);
}

#[tokio::test]
async fn test_argument_count_mismatch_fails_before_network() {
    let h = Harness::new(full().respond("eth_call", json!(word(1))), archive());

    let err = h
        .explorer
        .call_method("balanceOf", &BlockReference::Latest)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Abi(AbiError::ArgumentCount { expected: 1, actual: 0, .. })
    ));
    assert!(h.full.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_argument_fails_before_network() {
    let h = Harness::new(full().respond("eth_call", json!(word(1))), archive());

    let err = h
        .explorer
        .call_method_with_args("balanceOf", &[json!("0xnope")], &BlockReference::Latest)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Abi(AbiError::InvalidArgument { .. })));
    assert!(h.full.calls().is_empty());
}

#[tokio::test]
async fn test_call_data_targets_contract() {
    let h = Harness::new(full().respond("eth_call", json!(word(7))), archive());

    h.explorer
        .call_method_with_args(
            "balanceOf",
            &[json!(holder().to_string())],
            &BlockReference::Number(5),
        )
        .await
        .unwrap();

    let calls = h.full.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "eth_call");
    assert_eq!(calls[0].args[0], token_address().to_string());
    assert_eq!(
        calls[0].args[1],
        format!("70a08231000000000000000000000000{}", hex::encode(holder()))
    );
    assert_eq!(calls[0].args[2], "5");
}

#[tokio::test]
async fn test_string_output_is_decoded() {
    let data = format!(
        "0x{:064x}{:064x}{:0<64}",
        0x20,
        4,
        hex::encode("SHIB")
    );
    let h = Harness::new(full().respond("eth_call", json!(data)), archive());

    let output = h
        .explorer
        .call_method("name", &BlockReference::Latest)
        .await
        .unwrap();

    assert_eq!(output.values, vec![json!("SHIB")]);
    assert_eq!(
        h.reporter.lines(),
        vec!["[name-RESULT] Results from calling name method on block latest: SHIB"]
    );
}

#[tokio::test]
async fn test_no_contract_configured() {
    let explorer = Explorer::with_providers(full(), archive())
        .with_reporter(std::sync::Arc::new(MemoryReporter::new()));

    let err = explorer
        .call_method("totalSupply", &BlockReference::Latest)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoContract));
    assert!(explorer.catalog().is_none());
}

#[tokio::test]
async fn test_unsupported_type_fails_only_its_method() {
    let abi = ContractAbi::from_json(
        &json!([
            {"type": "function", "name": "price", "stateMutability": "view",
             "inputs": [], "outputs": [{"name": "", "type": "ufixed128x18"}]},
            {"type": "function", "name": "totalSupply", "stateMutability": "view",
             "inputs": [], "outputs": [{"name": "", "type": "uint256"}]}
        ])
        .to_string(),
    )
    .unwrap();
    let h = Harness::new(full().respond("eth_call", json!(word(7))), archive());
    let explorer = h
        .explorer
        .with_contract(Contract::new(token_address(), abi));

    assert_eq!(explorer.catalog().unwrap().names(), vec!["price", "totalSupply"]);

    let err = explorer
        .call_method("price", &BlockReference::Latest)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Abi(AbiError::UnsupportedType(ty)) if ty == "ufixed128x18"));
    assert!(h.full.calls().is_empty());
    assert_eq!(h.reporter.errors().len(), 1);

    let output = explorer
        .call_method("totalSupply", &BlockReference::Latest)
        .await
        .unwrap();
    assert_eq!(output.to_string(), "7");
    assert_eq!(h.full.calls().len(), 1);
}
