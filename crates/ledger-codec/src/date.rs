//! Ledger time: `u32` seconds since 2000-01-01T00:00:00Z.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{CodecError, CodecResult};

/// Unix timestamp of the ledger epoch.
pub const LEDGER_EPOCH_OFFSET: i64 = 946_684_800;

pub fn to_iso8601(ledger_time: u32) -> CodecResult<String> {
    let unix = LEDGER_EPOCH_OFFSET + i64::from(ledger_time);
    let instant = DateTime::<Utc>::from_timestamp(unix, 0)
        .ok_or_else(|| CodecError::out_of_range("ledger time", ledger_time, 0, u32::MAX))?;
    Ok(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Parses an RFC 3339 instant. The offset is required and the instant must
/// fall on a whole second.
pub fn to_ledger_time(iso: &str) -> CodecResult<u32> {
    let instant = DateTime::parse_from_rfc3339(iso)
        .map_err(|e| CodecError::invalid("date", format!("{iso:?}: {e}")))?;
    if instant.timestamp_subsec_nanos() != 0 {
        return Err(CodecError::invalid(
            "date",
            format!("{iso:?} has a sub-second part"),
        ));
    }
    let seconds = instant.timestamp() - LEDGER_EPOCH_OFFSET;
    u32::try_from(seconds).map_err(|_| {
        CodecError::out_of_range(
            "date",
            iso,
            "2000-01-01T00:00:00.000Z",
            "2136-02-07T06:28:15.000Z",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_zero_is_the_ledger_reference_date() {
        assert_eq!(to_iso8601(0).unwrap(), "2000-01-01T00:00:00.000Z");
        assert_eq!(to_ledger_time("2000-01-01T00:00:00.000Z").unwrap(), 0);
    }

    #[test]
    fn offsets_convert_to_utc() {
        assert_eq!(to_ledger_time("2000-01-01T01:00:00+01:00").unwrap(), 0);
        assert_eq!(to_ledger_time("2000-01-01T00:01:00Z").unwrap(), 60);
    }

    #[test]
    fn last_representable_second() {
        assert_eq!(to_iso8601(u32::MAX).unwrap(), "2136-02-07T06:28:15.000Z");
        assert_eq!(to_ledger_time("2136-02-07T06:28:15Z").unwrap(), u32::MAX);
        assert!(matches!(
            to_ledger_time("2136-02-07T06:28:16Z"),
            Err(CodecError::OutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_instants_before_the_epoch() {
        assert!(matches!(
            to_ledger_time("1999-12-31T23:59:59Z"),
            Err(CodecError::OutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_malformed_and_fractional_input() {
        for bad in ["2000-01-01", "2000-01-01T00:00:00", "yesterday"] {
            assert!(
                matches!(to_ledger_time(bad), Err(CodecError::InvalidFormat { .. })),
                "{bad}"
            );
        }
        assert!(matches!(
            to_ledger_time("2000-01-01T00:00:00.500Z"),
            Err(CodecError::InvalidFormat { .. })
        ));
    }
}
