//! Rate and date codec matrix: bounds, zero handling and epoch round trips.

use ledger_codec::{to_iso8601, to_ledger_time, CodecError, RateCodec};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn out_of_range(result: Result<u32, CodecError>) -> bool {
    matches!(result, Err(CodecError::OutOfRange { .. }))
}

// ---------------------------------------------------------------------------
// TradingFee
// ---------------------------------------------------------------------------

#[test]
fn trading_fee_bounds() {
    assert_eq!(RateCodec::TradingFee.encode(dec!(0)).unwrap(), 0);
    assert_eq!(RateCodec::TradingFee.encode(dec!(0.5)).unwrap(), 500);
    assert_eq!(RateCodec::TradingFee.encode(dec!(0.001)).unwrap(), 1);
    assert!(out_of_range(RateCodec::TradingFee.encode(dec!(1.001))));
    assert!(out_of_range(RateCodec::TradingFee.encode(dec!(1.5))));
    assert_eq!(RateCodec::TradingFee.decode(0), Decimal::ZERO);
    assert_eq!(RateCodec::TradingFee.decode(1000), dec!(1));
}

#[test]
fn trading_fee_decode_is_lenient() {
    assert_eq!(RateCodec::TradingFee.decode(65_535), dec!(65.535));
}

// ---------------------------------------------------------------------------
// TransferFee
// ---------------------------------------------------------------------------

#[test]
fn transfer_fee_bounds() {
    assert_eq!(RateCodec::TransferFee.encode(dec!(50)).unwrap(), 50_000);
    assert!(out_of_range(RateCodec::TransferFee.encode(dec!(50.0001))));
    assert!(out_of_range(RateCodec::TransferFee.encode(dec!(50.001))));
    assert_eq!(RateCodec::TransferFee.decode(0), Decimal::ZERO);
    let err = RateCodec::TransferFee.encode(dec!(51)).unwrap_err();
    assert_eq!(err.to_string(), "TransferFee must be between 0 and 50, got 51");
}

// ---------------------------------------------------------------------------
// TransferRate
// ---------------------------------------------------------------------------

#[test]
fn transfer_rate_zero_bypasses_the_range() {
    assert_eq!(RateCodec::TransferRate.encode(Decimal::ZERO).unwrap(), 0);
    assert_eq!(RateCodec::TransferRate.encode(dec!(0.000)).unwrap(), 0);
    assert_eq!(RateCodec::TransferRate.decode(0), Decimal::ZERO);
    assert_eq!(RateCodec::TransferRate.decode(1_000_000_000), Decimal::ZERO);
}

#[test]
fn transfer_rate_formula() {
    assert_eq!(RateCodec::TransferRate.encode(dec!(0.5)).unwrap(), 1_005_000_000);
    assert_eq!(RateCodec::TransferRate.encode(dec!(25)).unwrap(), 1_250_000_000);
    assert_eq!(RateCodec::TransferRate.encode(dec!(100)).unwrap(), 2_000_000_000);
    assert_eq!(RateCodec::TransferRate.decode(2_000_000_000), dec!(100));
    assert_eq!(RateCodec::TransferRate.decode(1_000_000_001), dec!(0.0000001));
}

#[test]
fn transfer_rate_bounds() {
    assert!(out_of_range(RateCodec::TransferRate.encode(dec!(100.0000001))));
    assert!(out_of_range(RateCodec::TransferRate.encode(dec!(-0.1))));
    assert!(out_of_range(RateCodec::TransferRate.encode(Decimal::MAX)));
}

proptest! {
    #[test]
    fn in_range_raw_rates_round_trip(raw in 1_000_000_000u32..=2_000_000_000) {
        let decoded = RateCodec::TransferRate.decode(raw);
        prop_assert_eq!(RateCodec::TransferRate.encode(decoded).unwrap(), raw);
    }

    #[test]
    fn in_range_fees_round_trip(raw in 0u32..=50_000) {
        prop_assert_eq!(RateCodec::TransferFee.encode(RateCodec::TransferFee.decode(raw)).unwrap(), raw);
        if raw <= 1000 {
            prop_assert_eq!(RateCodec::TradingFee.encode(RateCodec::TradingFee.decode(raw)).unwrap(), raw);
        }
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

#[test]
fn reference_dates() {
    assert_eq!(to_iso8601(0).unwrap(), "2000-01-01T00:00:00.000Z");
    assert_eq!(to_iso8601(86_400).unwrap(), "2000-01-02T00:00:00.000Z");
    assert_eq!(to_iso8601(772_254_672).unwrap(), "2024-06-21T03:11:12.000Z");
    assert_eq!(to_ledger_time("2024-06-21T03:11:12.000Z").unwrap(), 772_254_672);
}

#[test]
fn negative_offsets_move_forward() {
    assert_eq!(to_ledger_time("1999-12-31T19:00:00-05:00").unwrap(), 0);
}

proptest! {
    #[test]
    fn epoch_values_round_trip(epoch in any::<u32>()) {
        let iso = to_iso8601(epoch).unwrap();
        prop_assert_eq!(to_ledger_time(&iso).unwrap(), epoch);
    }
}
