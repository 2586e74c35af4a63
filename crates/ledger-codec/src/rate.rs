//! Fee and rate fields.
//!
//! Each rate is a `u32` on the wire and a decimal on the app side. Decoding
//! is lenient and never fails. Encoding range-checks the computed raw value
//! and refuses anything outside it.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{CodecError, CodecResult};

const TRANSFER_RATE_UNIT: u32 = 1_000_000;
const TRANSFER_RATE_MIN: u32 = 1_000_000_000;
const TRANSFER_RATE_MAX: u32 = 2_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateCodec {
    /// AMM trading fee, raw in units of 1/1000.
    TradingFee,
    /// NFToken transfer fee, raw in units of 1/1000.
    TransferFee,
    /// Issuer transfer rate, raw `1_000_000_000` meaning no fee.
    TransferRate,
}

impl RateCodec {
    pub fn field(self) -> &'static str {
        match self {
            RateCodec::TradingFee => "TradingFee",
            RateCodec::TransferFee => "TransferFee",
            RateCodec::TransferRate => "TransferRate",
        }
    }

    /// Inclusive raw bounds accepted on encode.
    pub fn raw_range(self) -> (u32, u32) {
        match self {
            RateCodec::TradingFee => (0, 1_000),
            RateCodec::TransferFee => (0, 50_000),
            RateCodec::TransferRate => (TRANSFER_RATE_MIN, TRANSFER_RATE_MAX),
        }
    }

    /// Inclusive bounds in decoded units, as reported by `OutOfRange`.
    pub fn range(self) -> (Decimal, Decimal) {
        let (min, max) = self.raw_range();
        (self.decode(min), self.decode(max))
    }

    pub fn decode(self, raw: u32) -> Decimal {
        if raw == 0 {
            return Decimal::ZERO;
        }
        let raw = Decimal::from(raw);
        let value = match self {
            RateCodec::TradingFee | RateCodec::TransferFee => raw / Decimal::ONE_THOUSAND,
            RateCodec::TransferRate => {
                (raw / Decimal::from(TRANSFER_RATE_UNIT) - Decimal::ONE_THOUSAND) / Decimal::TEN
            }
        };
        value.normalize()
    }

    pub fn encode(self, value: Decimal) -> CodecResult<u32> {
        if self == RateCodec::TransferRate && value.is_zero() {
            return Ok(0);
        }
        let (min, max) = self.raw_range();
        let out_of_range = || {
            let (lo, hi) = self.range();
            CodecError::out_of_range(self.field(), value, lo, hi)
        };

        let raw = match self {
            RateCodec::TradingFee | RateCodec::TransferFee => {
                value.checked_mul(Decimal::ONE_THOUSAND)
            }
            RateCodec::TransferRate => value
                .checked_mul(Decimal::TEN)
                .and_then(|v| v.checked_add(Decimal::ONE_THOUSAND))
                .and_then(|v| v.checked_mul(Decimal::from(TRANSFER_RATE_UNIT))),
        }
        .ok_or_else(out_of_range)?;

        if raw < Decimal::from(min) || raw > Decimal::from(max) {
            return Err(out_of_range());
        }
        if !raw.fract().is_zero() {
            return Err(CodecError::invalid(
                self.field(),
                format!("{value} does not map to a whole raw value"),
            ));
        }
        raw.to_u32().ok_or_else(out_of_range)
    }
}
