//! Native and issued amounts.
//!
//! The ledger carries native amounts as an unsigned integer string of drops
//! (1 native unit = 1,000,000 drops) and issued amounts as an object with a
//! decimal `value`. Drops fit a 96-bit decimal; issued values do not, and go
//! through [`IouDecimal`]. Every conversion here is exact decimal arithmetic.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CodecError, CodecResult};
use crate::iou::{IouDecimal, Rounding};

/// Decimal places of the native asset.
pub const NATIVE_SCALE: u32 = 6;

pub const DROPS_PER_NATIVE: u64 = 1_000_000;

/// Significant digits an issued value keeps on the ledger.
pub const IOU_PRECISION: u32 = 15;

const IOU_SLICE_DIGITS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedAmount {
    pub currency: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

/// A decoded amount: a native decimal string or an issued amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountValue {
    Native(String),
    Issued(IssuedAmount),
}

impl AmountValue {
    pub fn native(value: impl Into<String>) -> Self {
        AmountValue::Native(value.into())
    }

    pub fn issued(
        currency: impl Into<String>,
        value: impl Into<String>,
        issuer: Option<&str>,
    ) -> Self {
        AmountValue::Issued(IssuedAmount {
            currency: currency.into(),
            value: value.into(),
            issuer: issuer.map(str::to_string),
        })
    }

    pub fn is_native(&self) -> bool {
        matches!(self, AmountValue::Native(_))
    }

    pub fn value(&self) -> &str {
        match self {
            AmountValue::Native(v) => v,
            AmountValue::Issued(a) => &a.value,
        }
    }
}

/// Splits an unsigned plain decimal into its integer and fraction digits.
fn split_plain<'a>(field: &'static str, value: &'a str) -> CodecResult<(&'a str, &'a str)> {
    let (int, frac) = match value.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (value, ""),
    };
    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int.is_empty() && frac.is_empty() {
        return Err(CodecError::invalid(field, format!("{value:?} has no digits")));
    }
    if !digits_only(int) || !digits_only(frac) {
        return Err(CodecError::invalid(
            field,
            format!("{value:?} is not an unsigned plain decimal"),
        ));
    }
    Ok((int, frac))
}

/// Converts a wire drops string to a native decimal. Drops must be canonical:
/// digits only, no leading zeros.
pub fn drops_to_native(drops: &str) -> CodecResult<String> {
    if drops.is_empty() || !drops.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::invalid(
            "drops",
            format!("{drops:?} is not an unsigned integer"),
        ));
    }
    if drops.len() > 1 && drops.starts_with('0') {
        return Err(CodecError::invalid(
            "drops",
            format!("{drops:?} has leading zeros"),
        ));
    }
    let raw = u64::from_str(drops)
        .map_err(|_| CodecError::out_of_range("drops", drops, 0, u64::MAX))?;
    let native = Decimal::from_i128_with_scale(i128::from(raw), NATIVE_SCALE);
    Ok(native.normalize().to_string())
}

pub fn native_to_drops(value: &str) -> CodecResult<String> {
    let (int, frac) = split_plain("native amount", value)?;
    let frac = frac.trim_end_matches('0');
    if frac.len() > NATIVE_SCALE as usize {
        return Err(CodecError::FractionalDrops(value.to_string()));
    }
    // Shifting the point six places is the exact multiply by 10^6.
    let scaled = format!("{int}{frac:0<width$}", width = NATIVE_SCALE as usize);
    let drops = u64::from_str(&scaled)
        .map_err(|_| CodecError::out_of_range("drops", value, 0, u64::MAX))?;
    Ok(drops.to_string())
}

/// Scales `value` so that, after the issuer keeps its `rate` percent cut, at
/// least `value` arrives. `rate` is a decoded TransferRate (0.2 means 0.2%).
/// `value` may be plain or scientific and span the full issued range.
///
/// The result is rounded away from zero to the ledger's 15 significant digits.
pub fn with_transfer_rate(value: &str, rate: Decimal) -> CodecResult<String> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(CodecError::out_of_range("TransferRate", rate, 0, 100));
    }
    let amount = IouDecimal::parse("amount", value)?;
    let factor = IouDecimal::from(Decimal::ONE_HUNDRED + rate).shift(-2);
    Ok((amount * factor)
        .round_significant(IOU_PRECISION, Rounding::AwayFromZero)
        .to_string())
}

/// Cuts a decimal string to the 16 digit positions an issued amount can carry
/// reliably. Digits past that are dropped, not rounded.
pub fn value_to_iou(value: &str) -> CodecResult<String> {
    let (int, frac) = split_plain("IOU value", value)?;
    let int = if int.is_empty() { "0" } else { int };
    if int.len() > IOU_SLICE_DIGITS {
        return Err(CodecError::out_of_range(
            "IOU value",
            value,
            0,
            "9".repeat(IOU_SLICE_DIGITS),
        ));
    }
    let keep = (IOU_SLICE_DIGITS - int.len()).min(frac.len());
    let frac = frac[..keep].trim_end_matches('0');
    Ok(if frac.is_empty() {
        int.to_string()
    } else {
        format!("{int}.{frac}")
    })
}

pub fn decode_amount(wire: &Value) -> CodecResult<AmountValue> {
    match wire {
        Value::String(drops) => drops_to_native(drops).map(AmountValue::Native),
        Value::Object(_) => serde_json::from_value::<IssuedAmount>(wire.clone())
            .map(AmountValue::Issued)
            .map_err(|e| CodecError::invalid("Amount", e.to_string())),
        other => Err(CodecError::invalid(
            "Amount",
            format!("expected drops string or amount object, got {other}"),
        )),
    }
}

pub fn encode_amount(amount: &AmountValue) -> CodecResult<Value> {
    match amount {
        AmountValue::Native(value) => native_to_drops(value).map(Value::String),
        AmountValue::Issued(issued) => {
            let mut out = Map::new();
            out.insert("currency".into(), Value::String(issued.currency.clone()));
            if let Some(issuer) = &issued.issuer {
                out.insert("issuer".into(), Value::String(issuer.clone()));
            }
            out.insert("value".into(), Value::String(issued.value.clone()));
            Ok(Value::Object(out))
        }
    }
}
