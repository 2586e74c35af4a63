//! Display names for currency codes.

use crate::error::CodecError;

/// Code of the ledger's native asset. No issued currency may use it.
pub const NATIVE_CURRENCY: &str = "XRP";

pub const FAKE_NATIVE_CURRENCY: &str = "FakeXRP";

const HEX_CODE_LEN: usize = 40;
/// Non-standard codes starting with this byte carry 8 bytes of metadata.
const METADATA_MARKER: u8 = 0x02;
const METADATA_LEN: usize = 8;

/// Turns a 160-bit hex currency code into its text form and marks issued
/// codes that imitate the native asset. Anything else is returned as is.
pub fn normalize_currency_code(code: &str) -> String {
    if code.len() == HEX_CODE_LEN && code.bytes().all(|b| b.is_ascii_hexdigit()) {
        return match decode_hex_code(code) {
            Ok(text) if text.eq_ignore_ascii_case(NATIVE_CURRENCY) => FAKE_NATIVE_CURRENCY.into(),
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(code, error = %err, "hex currency code is not text, kept raw");
                code.to_string()
            }
        };
    }
    if code != NATIVE_CURRENCY && code.eq_ignore_ascii_case(NATIVE_CURRENCY) {
        return FAKE_NATIVE_CURRENCY.into();
    }
    code.to_string()
}

fn decode_hex_code(code: &str) -> Result<String, CodecError> {
    let bytes = hex::decode(code).map_err(|e| CodecError::invalid("currency", e.to_string()))?;
    let body = match bytes.first() {
        Some(&METADATA_MARKER) => &bytes[METADATA_LEN..],
        _ => &bytes[..],
    };
    let text: Vec<u8> = body.iter().copied().filter(|b| *b != 0).collect();
    String::from_utf8(text).map_err(|e| CodecError::invalid("currency", e.to_string()))
}
