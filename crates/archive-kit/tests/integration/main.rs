//! Integration tests for archive-kit.
//!
//! These tests drive the explorer against recording mock providers, or
//! against canned HTTP nodes on the loopback interface.
//!
//! Run with: `cargo test --test integration`


mod config_integration;
mod contract_integration;
mod facade_integration;
mod rpc_integration;
