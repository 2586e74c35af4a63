//! Decoded, app-side field values.

use indexmap::IndexMap;
use ledger_codec_flags::ParsedFlags;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::amount::AmountValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AppValue {
    Flags(ParsedFlags),
    FlagNames(Vec<String>),
    FlagName(String),
    Amount(AmountValue),
    Amounts(Vec<AmountValue>),
    Rate(Decimal),
    /// ISO 8601 UTC instant.
    Date(String),
    Text(String),
    /// Elements of a singleton-keyed array with the envelope removed.
    Objects(Vec<Value>),
    /// A field without a codec, or a discriminator.
    Raw(Value),
}

impl AppValue {
    pub fn kind(&self) -> &'static str {
        match self {
            AppValue::Flags(_) => "flags",
            AppValue::FlagNames(_) => "flag_names",
            AppValue::FlagName(_) => "flag_name",
            AppValue::Amount(_) => "amount",
            AppValue::Amounts(_) => "amounts",
            AppValue::Rate(_) => "rate",
            AppValue::Date(_) => "date",
            AppValue::Text(_) => "text",
            AppValue::Objects(_) => "objects",
            AppValue::Raw(_) => "raw",
        }
    }

    pub fn as_raw_str(&self) -> Option<&str> {
        match self {
            AppValue::Raw(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl From<AmountValue> for AppValue {
    fn from(amount: AmountValue) -> Self {
        AppValue::Amount(amount)
    }
}

impl From<Decimal> for AppValue {
    fn from(rate: Decimal) -> Self {
        AppValue::Rate(rate)
    }
}

impl From<ParsedFlags> for AppValue {
    fn from(flags: ParsedFlags) -> Self {
        AppValue::Flags(flags)
    }
}

/// A decoded record, in wire field order.
pub type AppRecord = IndexMap<String, AppValue>;
