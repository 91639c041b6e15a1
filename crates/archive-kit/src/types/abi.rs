//! Contract interface description (JSON ABI).

use std::path::Path;

use alloy_json_abi::{Function, StateMutability};
use serde_json::Value;

use crate::error::AbiError;

/// The function entries of a contract's JSON ABI, in declaration order.
///
/// `alloy_json_abi::JsonAbi` groups functions by name, which loses the order
/// the entries were declared in; the catalog lists methods in that order, so
/// the entries are kept as a list here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractAbi {
    functions: Vec<Function>,
}

impl ContractAbi {
    /// Create from function entries.
    pub fn new(functions: Vec<Function>) -> Self {
        Self { functions }
    }

    /// Parse from JSON.
    ///
    /// Accepts either the bare entry array or a compiler artifact object with
    /// an `abi` field. Entries other than functions are skipped; an entry
    /// without a `type` is a function.
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        let entries = match serde_json::from_str::<Value>(json)? {
            Value::Array(entries) => entries,
            Value::Object(mut artifact) => match artifact.remove("abi") {
                Some(Value::Array(entries)) => entries,
                _ => return Err(AbiError::Format("artifact has no `abi` array".to_string())),
            },
            _ => {
                return Err(AbiError::Format(
                    "expected an entry array or an artifact object".to_string(),
                ));
            }
        };

        let functions = entries
            .into_iter()
            .filter_map(as_function_entry)
            .map(serde_json::from_value::<Function>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { functions })
    }

    /// Read and parse a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AbiError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Function entries in declaration order.
    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    /// Functions declared `view`, in declaration order.
    pub fn view_functions(&self) -> impl Iterator<Item = &Function> {
        self.functions
            .iter()
            .filter(|f| f.state_mutability == StateMutability::View)
    }
}

/// The entry as a tagged function object, or `None` for other entry kinds.
fn as_function_entry(entry: Value) -> Option<Value> {
    let Value::Object(mut object) = entry else {
        return None;
    };
    match object.get("type").and_then(Value::as_str) {
        Some("function") => {}
        None => {
            object.insert("type".to_string(), Value::String("function".to_string()));
        }
        Some(_) => return None,
    }
    Some(Value::Object(object))
}
