//! The configured contract: address, ABI and view-method catalog.
//!
//! # Example
//!
//! ```rust
//! use archive_kit::{Contract, ContractAbi};
//!
//! let abi = ContractAbi::from_json(r#"[
//!     {"type":"function","name":"totalSupply","stateMutability":"view",
//!      "inputs":[],"outputs":[{"name":"","type":"uint256"}]}
//! ]"#)?;
//! let contract = Contract::new("0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce".parse()?, abi);
//!
//! assert_eq!(contract.catalog().names(), vec!["totalSupply"]);
//! let data = contract.encode_call("totalSupply", &[])?;
//! assert_eq!(hex::encode(data), "18160ddd");
//! # Ok::<(), archive_kit::Error>(())
//! ```

mod catalog;
pub mod codec;

use std::fmt::{self, Display};

use alloy_dyn_abi::JsonAbiExt;
use serde_json::Value;

pub use alloy_dyn_abi::{DynSolType, DynSolValue};
pub use catalog::{InputDescriptor, MethodCatalog, MethodDescriptor};

use crate::error::{AbiError, Error};
use crate::types::{Address, Bytes, ContractAbi};

/// A contract whose view methods can be called.
#[derive(Clone, Debug)]
pub struct Contract {
    address: Address,
    abi: ContractAbi,
    catalog: MethodCatalog,
}

impl Contract {
    /// Create a contract, building its view-method catalog.
    pub fn new(address: Address, abi: ContractAbi) -> Self {
        let catalog = MethodCatalog::from_abi(&abi);
        Self {
            address,
            abi,
            catalog,
        }
    }

    /// The contract's address, the target of every call.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The interface the catalog was built from.
    pub fn abi(&self) -> &ContractAbi {
        &self.abi
    }

    /// The contract's view methods.
    pub fn catalog(&self) -> &MethodCatalog {
        &self.catalog
    }

    /// Look up a view method by name.
    pub fn method(&self, name: &str) -> Result<&MethodDescriptor, Error> {
        self.catalog
            .lookup(name)
            .map(|(_, method)| method)
            .ok_or_else(|| Error::UnknownMethod(name.to_string()))
    }

    /// Build call data for a view method: selector followed by the encoded
    /// arguments.
    pub fn encode_call(&self, name: &str, args: &[Value]) -> Result<Vec<u8>, Error> {
        let method = self.method(name)?;
        Ok(encode_method_call(method, args)?)
    }
}

/// Build call data for `method` with positional `args`.
pub fn encode_method_call(method: &MethodDescriptor, args: &[Value]) -> Result<Vec<u8>, AbiError> {
    if args.len() != method.arity() {
        return Err(AbiError::ArgumentCount {
            method: method.name.clone(),
            expected: method.arity(),
            actual: args.len(),
        });
    }

    let values = method
        .input_types()?
        .iter()
        .zip(args)
        .map(|(ty, arg)| codec::coerce(ty, arg))
        .collect::<Result<Vec<_>, _>>()?;

    method
        .function()
        .abi_encode_input(&values)
        .map_err(|e| AbiError::Encode(e.to_string()))
}

/// Decoded result of a view call.
#[derive(Clone, Debug, PartialEq)]
pub struct CallOutput {
    /// Method name.
    pub method: String,
    /// Raw return data.
    pub raw: Bytes,
    /// Decoded outputs, empty when the method declares none.
    pub values: Vec<Value>,
}

impl CallOutput {
    /// Decode raw return data against a method's declared outputs.
    pub fn decode(method: &MethodDescriptor, raw: Bytes) -> Result<Self, AbiError> {
        Self::decode_as(&method.name, &method.output_types()?, raw)
    }

    pub(crate) fn decode_as(
        method: &str,
        outputs: &[DynSolType],
        raw: Bytes,
    ) -> Result<Self, AbiError> {
        let values = if outputs.is_empty() {
            Vec::new()
        } else {
            codec::decode(outputs, &raw)?
                .iter()
                .map(codec::to_json)
                .collect()
        };
        Ok(Self {
            method: method.to_string(),
            raw,
            values,
        })
    }
}

impl Display for CallOutput {
    /// A single string value prints bare; several values print as a JSON
    /// array; no declared outputs prints the raw hex.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.values.as_slice() {
            [] => write!(f, "{}", self.raw),
            [Value::String(s)] => f.write_str(s),
            [value] => write!(f, "{value}"),
            values => write!(f, "{}", Value::Array(values.to_vec())),
        }
    }
}
