//! View-method catalog derived from a contract ABI.

use alloy_dyn_abi::DynSolType;
use alloy_json_abi::{Function, Param};
use alloy_primitives::Selector;
use serde_json::Value;

use super::codec;
use crate::error::AbiError;
use crate::types::ContractAbi;

/// One declared input of a view method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputDescriptor {
    /// Declared parameter name (may be empty).
    pub name: String,
    /// Declared type string, e.g. `address` or `uint256[]`.
    pub ty: String,
    param: Param,
}

impl InputDescriptor {
    fn from_param(param: &Param) -> Self {
        Self {
            name: param.name.clone(),
            ty: param.ty.clone(),
            param: param.clone(),
        }
    }

    /// The resolved ABI type.
    ///
    /// Fails with [`AbiError::UnsupportedType`] for types the codec cannot
    /// handle, such as fixed-point numbers.
    pub fn param_type(&self) -> Result<DynSolType, AbiError> {
        codec::resolve(&self.param)
    }

    /// The default value a prompt shows for this input, `null` when the type
    /// is unsupported.
    pub fn placeholder(&self) -> Value {
        self.param_type()
            .map(|ty| codec::placeholder(&ty))
            .unwrap_or(Value::Null)
    }
}

/// A view method: its name, inputs and canonical signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub inputs: Vec<InputDescriptor>,
    /// Canonical signature, e.g. `balanceOf(address)`.
    pub signature: String,
    function: Function,
}

impl MethodDescriptor {
    fn from_function(function: &Function) -> Self {
        Self {
            name: function.name.clone(),
            inputs: function.inputs.iter().map(InputDescriptor::from_param).collect(),
            signature: function.signature(),
            function: function.clone(),
        }
    }

    /// Number of declared inputs.
    pub fn arity(&self) -> usize {
        self.inputs.len()
    }

    /// Four-byte function selector.
    pub fn selector(&self) -> Selector {
        self.function.selector()
    }

    /// The ABI entry this method was built from.
    pub fn function(&self) -> &Function {
        &self.function
    }

    /// Resolved input types, in declaration order.
    pub fn input_types(&self) -> Result<Vec<DynSolType>, AbiError> {
        self.inputs.iter().map(InputDescriptor::param_type).collect()
    }

    /// Resolved output types, in declaration order.
    pub fn output_types(&self) -> Result<Vec<DynSolType>, AbiError> {
        self.function.outputs.iter().map(codec::resolve).collect()
    }
}

/// Ordered list of a contract's view methods.
///
/// Every function entry whose `stateMutability` is exactly `view` is kept,
/// in declaration order. Types are resolved when a method is used, so one
/// method with an unsupported type does not hide the others. When a name is
/// overloaded, [`lookup`] returns the first declaration.
///
/// [`lookup`]: MethodCatalog::lookup
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MethodCatalog {
    methods: Vec<MethodDescriptor>,
}

impl MethodCatalog {
    /// Build the catalog from an ABI.
    pub fn from_abi(abi: &ContractAbi) -> Self {
        let methods: Vec<_> = abi
            .view_functions()
            .map(MethodDescriptor::from_function)
            .collect();

        tracing::debug!(count = methods.len(), "built view-method catalog");
        Self { methods }
    }

    /// Method names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }

    /// Inputs of the method at `index`.
    pub fn inputs(&self, index: usize) -> Option<&[InputDescriptor]> {
        self.methods.get(index).map(|m| m.inputs.as_slice())
    }

    /// Find a method by name. Returns the first match and its index.
    pub fn lookup(&self, name: &str) -> Option<(usize, &MethodDescriptor)> {
        self.methods.iter().enumerate().find(|(_, m)| m.name == name)
    }

    /// The method at `index`.
    pub fn get(&self, index: usize) -> Option<&MethodDescriptor> {
        self.methods.get(index)
    }

    /// Number of view methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Check if the contract declares no view methods.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Methods in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.iter()
    }
}
