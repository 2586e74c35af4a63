//! Flag definitions as published by a ledger node.
//!
//! The node's definitions document carries the flag names for every type it
//! supports. Loading it lets the table follow the network instead of the
//! compiled-in defaults. Entries for types this crate does not know are
//! skipped.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::builtin::{to_defs, MODE_FLAG_TYPES, UNIVERSAL_FLAGS};
use crate::error::FlagError;
use crate::table::{FlagDef, FlagTable};
use crate::types::{LedgerEntryType, TransactionType};

/// Key inside `transactionFlags` holding the flags every transaction accepts.
pub const UNIVERSAL_KEY: &str = "Universal";

type NamedValues = IndexMap<String, u32>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDefinitions {
    #[serde(default)]
    pub transaction_flags: IndexMap<String, NamedValues>,
    #[serde(default)]
    pub transaction_flags_indices: IndexMap<String, NamedValues>,
    #[serde(default)]
    pub ledger_entry_flags: IndexMap<String, NamedValues>,
}

impl NetworkDefinitions {
    pub fn from_json_str(json: &str) -> Result<Self, FlagError> {
        serde_json::from_str(json).map_err(|e| FlagError::InvalidTable(e.to_string()))
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, FlagError> {
        serde_json::from_value(value).map_err(|e| FlagError::InvalidTable(e.to_string()))
    }
}

fn named(values: &NamedValues) -> Vec<FlagDef> {
    values
        .iter()
        .map(|(name, value)| FlagDef::new(name.as_str(), *value))
        .collect()
}

impl FlagTable {
    pub fn from_definitions(defs: &NetworkDefinitions) -> Result<FlagTable, FlagError> {
        let universal = match defs.transaction_flags.get(UNIVERSAL_KEY) {
            Some(values) => named(values),
            None => to_defs(UNIVERSAL_FLAGS),
        };
        let mut builder = FlagTable::builder().universal(universal);

        for (name, values) in &defs.transaction_flags {
            if name == UNIVERSAL_KEY {
                continue;
            }
            match TransactionType::parse_str(name) {
                Ok(t) => {
                    builder = builder.flags(t, named(values));
                    if MODE_FLAG_TYPES.contains(&t) && !defs.transaction_flags_indices.contains_key(name) {
                        builder = builder.indices(t, named(values));
                    }
                }
                Err(_) => tracing::warn!(type_name = %name, "skipping flags for unknown transaction type"),
            }
        }
        for (name, values) in &defs.transaction_flags_indices {
            match TransactionType::parse_str(name) {
                Ok(t) => builder = builder.indices(t, named(values)),
                Err(_) => tracing::warn!(type_name = %name, "skipping flag indices for unknown transaction type"),
            }
        }
        for (name, values) in &defs.ledger_entry_flags {
            match LedgerEntryType::parse_str(name) {
                Ok(t) => builder = builder.flags(t, named(values)),
                Err(_) => tracing::warn!(type_name = %name, "skipping flags for unknown ledger entry type"),
            }
        }

        builder.build()
    }
}
