//! Conversion between JSON values and ABI values.
//!
//! Arguments arrive as JSON values, usually strings typed by an operator.
//! Scalars go through [`DynSolType::coerce_str`]; JSON arrays are matched
//! element by element against array and tuple types. Decoded return values
//! are rendered back to JSON for display.

use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::Param;
use alloy_primitives::Address;
use serde_json::Value;

use crate::error::AbiError;

/// Resolve a declared parameter into its ABI type.
pub fn resolve(param: &Param) -> Result<DynSolType, AbiError> {
    param.resolve().map_err(|e| {
        tracing::debug!(ty = %param.ty, error = %e, "unresolvable ABI type");
        AbiError::UnsupportedType(param.ty.clone())
    })
}

/// Convert a JSON argument into a value of the given type.
pub fn coerce(ty: &DynSolType, value: &Value) -> Result<DynSolValue, AbiError> {
    let invalid = |reason: String| AbiError::invalid_argument(ty, value, reason);

    match (ty, value) {
        (DynSolType::Array(inner), Value::Array(items)) => {
            Ok(DynSolValue::Array(coerce_each(inner, items)?))
        }
        (DynSolType::FixedArray(inner, len), Value::Array(items)) => {
            if items.len() != *len {
                return Err(invalid(format!("expected {len} elements")));
            }
            Ok(DynSolValue::FixedArray(coerce_each(inner, items)?))
        }
        (DynSolType::Tuple(members), Value::Array(items)) => {
            if items.len() != members.len() {
                return Err(invalid(format!("expected {} members", members.len())));
            }
            let values = members
                .iter()
                .zip(items)
                .map(|(member, item)| coerce(member, item))
                .collect::<Result<_, _>>()?;
            Ok(DynSolValue::Tuple(values))
        }
        (_, Value::String(s)) => ty.coerce_str(s).map_err(|e| invalid(e.to_string())),
        (_, Value::Number(n)) => ty
            .coerce_str(&n.to_string())
            .map_err(|e| invalid(e.to_string())),
        (_, Value::Bool(b)) => ty
            .coerce_str(if *b { "true" } else { "false" })
            .map_err(|e| invalid(e.to_string())),
        _ => Err(invalid("unexpected JSON value".to_string())),
    }
}

fn coerce_each(ty: &DynSolType, items: &[Value]) -> Result<Vec<DynSolValue>, AbiError> {
    items.iter().map(|item| coerce(ty, item)).collect()
}

/// Render a value for display: integers as decimal strings, byte values and
/// addresses as lowercase `0x` hex, arrays and tuples as JSON arrays.
pub fn to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::Int(v, _) => Value::String(v.to_string()),
        DynSolValue::Uint(v, _) => Value::String(v.to_string()),
        DynSolValue::FixedBytes(word, size) => Value::String(format!("0x{}", hex::encode(&word[..*size]))),
        DynSolValue::Address(a) => Value::String(format!("{a:#x}")),
        DynSolValue::Function(f) => Value::String(format!("0x{}", hex::encode(f))),
        DynSolValue::Bytes(b) => Value::String(format!("0x{}", hex::encode(b))),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) | DynSolValue::Tuple(items) => {
            Value::Array(items.iter().map(to_json).collect())
        }
        #[allow(unreachable_patterns)]
        _ => Value::Null,
    }
}

/// Default value a prompt shows for an input of type `ty`.
pub fn placeholder(ty: &DynSolType) -> Value {
    match ty {
        DynSolType::Address => Value::String(Address::ZERO.to_string()),
        DynSolType::Uint(_) | DynSolType::Int(_) => Value::from(0),
        DynSolType::Bool => Value::Bool(false),
        DynSolType::FixedBytes(_) | DynSolType::Bytes | DynSolType::Function => {
            Value::String("0x".to_string())
        }
        DynSolType::String => Value::String(String::new()),
        DynSolType::Array(_) | DynSolType::FixedArray(..) => Value::Array(Vec::new()),
        DynSolType::Tuple(members) => Value::Array(members.iter().map(placeholder).collect()),
        #[allow(unreachable_patterns)]
        _ => Value::Null,
    }
}

/// Decode return data laid out as a sequence of `types`.
pub fn decode(types: &[DynSolType], data: &[u8]) -> Result<Vec<DynSolValue>, AbiError> {
    let decoded = DynSolType::Tuple(types.to_vec())
        .abi_decode_sequence(data)
        .map_err(|e| AbiError::Decode(e.to_string()))?;
    match decoded {
        DynSolValue::Tuple(values) => Ok(values),
        other => Ok(vec![other]),
    }
}
