//! Singleton-keyed arrays.
//!
//! The ledger wraps each element of several array fields in an object with a
//! single key, e.g. `[{"Memo": {...}}, {"Memo": {...}}]`. [`SingletonArray`]
//! strips that envelope on decode and puts it back on encode.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CodecError, CodecResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingletonArray {
    pub field: &'static str,
    pub key: &'static str,
}

pub const MEMOS: SingletonArray = SingletonArray::new("Memos", "Memo");
pub const SIGNERS: SingletonArray = SingletonArray::new("Signers", "Signer");
pub const SIGNER_ENTRIES: SingletonArray = SingletonArray::new("SignerEntries", "SignerEntry");
pub const AUTH_ACCOUNTS: SingletonArray = SingletonArray::new("AuthAccounts", "AuthAccount");
pub const HOOK_PARAMETERS: SingletonArray =
    SingletonArray::new("HookParameters", "HookParameter");
pub const AMOUNTS: SingletonArray = SingletonArray::new("Amounts", "AmountEntry");
pub const HOOK_EXECUTIONS: SingletonArray =
    SingletonArray::new("HookExecutions", "HookExecution");

impl SingletonArray {
    pub const fn new(field: &'static str, key: &'static str) -> Self {
        Self { field, key }
    }

    pub fn unwrap(&self, wire: &Value) -> CodecResult<Vec<Value>> {
        let items = wire
            .as_array()
            .ok_or_else(|| CodecError::invalid(self.field, format!("expected an array, got {wire}")))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.get(self.key).cloned().ok_or_else(|| {
                    CodecError::invalid(
                        self.field,
                        format!("element {i} is not wrapped in {}", self.key),
                    )
                })
            })
            .collect()
    }

    pub fn wrap(&self, items: &[Value]) -> CodecResult<Value> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if !item.is_object() {
                    return Err(CodecError::invalid(
                        self.field,
                        format!("element {i} is not an object"),
                    ));
                }
                let mut envelope = Map::new();
                envelope.insert(self.key.to_string(), item.clone());
                Ok(Value::Object(envelope))
            })
            .collect::<CodecResult<Vec<_>>>()
            .map(Value::Array)
    }

    pub fn unwrap_as<T: DeserializeOwned>(&self, wire: &Value) -> CodecResult<Vec<T>> {
        self.unwrap(wire)?
            .into_iter()
            .map(|inner| {
                serde_json::from_value(inner).map_err(|e| CodecError::invalid(self.field, e.to_string()))
            })
            .collect()
    }

    pub fn wrap_from<T: Serialize>(&self, items: &[T]) -> CodecResult<Value> {
        let values = items
            .iter()
            .map(|item| {
                serde_json::to_value(item).map_err(|e| CodecError::invalid(self.field, e.to_string()))
            })
            .collect::<CodecResult<Vec<_>>>()?;
        self.wrap(&values)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Memo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Signer {
    pub account: String,
    pub txn_signature: String,
    pub signing_pub_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignerEntry {
    pub account: String,
    pub signer_weight: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_locator: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthAccount {
    pub account: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HookParameter {
    pub hook_parameter_name: String,
    pub hook_parameter_value: String,
}
