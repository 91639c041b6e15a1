//! Configuration through the builder and environment-style variables.

use std::collections::HashMap;
use std::io::Write;

use archive_kit::*;

const ABI: &str = r#"{"abi": [
    {"type":"function","name":"owner","stateMutability":"view",
     "inputs":[],"outputs":[{"name":"","type":"address"}]},
    {"type":"function","name":"renounceOwnership","stateMutability":"nonpayable",
     "inputs":[],"outputs":[]}
]}"#;

fn lookup(pairs: Vec<(&'static str, String)>) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<&str, String> = pairs.into_iter().collect();
    move |key: &str| map.get(key).cloned()
}

fn urls() -> Vec<(&'static str, String)> {
    vec![
        ("ETH_FULL_NODE_URL", "https://full.example.com".to_string()),
        ("ETH_ARCHIVE_NODE_URL", "https://archive.example.com".to_string()),
    ]
}

#[test]
fn test_from_vars_with_contract_artifact() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ABI.as_bytes()).unwrap();

    let mut vars = urls();
    vars.push(("ETH_CONTRACT_ADDRESS", "0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce".to_string()));
    vars.push(("ETH_CONTRACT_ABI", file.path().display().to_string()));

    let explorer = Explorer::from_vars(lookup(vars)).unwrap();

    assert_eq!(explorer.executor().full().url(), "https://full.example.com");
    assert_eq!(explorer.executor().archive().url(), "https://archive.example.com");
    assert_eq!(explorer.catalog().unwrap().names(), vec!["owner"]);
}

#[test]
fn test_from_vars_missing_full_url() {
    let vars = vec![("ETH_ARCHIVE_NODE_URL", "https://archive.example.com".to_string())];

    let err = Explorer::from_vars(lookup(vars)).unwrap_err();

    assert!(matches!(err, Error::Config(msg) if msg.contains("ETH_FULL_NODE_URL")));
}

#[test]
fn test_from_vars_abi_without_address() {
    let mut vars = urls();
    vars.push(("ETH_CONTRACT_ABI", "/nonexistent/abi.json".to_string()));

    let err = Explorer::from_vars(lookup(vars)).unwrap_err();

    assert!(matches!(err, Error::Config(msg) if msg.contains("ETH_CONTRACT_ADDRESS")));
}

#[test]
fn test_from_vars_unreadable_abi() {
    let mut vars = urls();
    vars.push(("ETH_CONTRACT_ADDRESS", "0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce".to_string()));
    vars.push(("ETH_CONTRACT_ABI", "/nonexistent/abi.json".to_string()));

    let err = Explorer::from_vars(lookup(vars)).unwrap_err();

    assert!(matches!(err, Error::Abi(AbiError::Io(_))));
}

#[test]
fn test_builder_accepts_unsupported_abi_type() {
    let abi = ContractAbi::from_json(
        r#"[{"type":"function","name":"rate","stateMutability":"view",
        "inputs":[],"outputs":[{"name":"","type":"ufixed128x18"}]},
        {"type":"function","name":"owner","stateMutability":"view",
        "inputs":[],"outputs":[{"name":"","type":"address"}]}]"#,
    )
    .unwrap();

    let explorer = Explorer::builder("https://full.example.com", "https://archive.example.com")
        .contract(Address::ZERO, abi)
        .build()
        .unwrap();

    assert_eq!(explorer.catalog().unwrap().names(), vec!["rate", "owner"]);
    assert_eq!(explorer.executor().full().role(), NodeRole::Full);
    assert_eq!(explorer.executor().archive().role(), NodeRole::Archive);
}
