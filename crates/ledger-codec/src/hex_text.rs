//! Text fields carried as hex on the wire (`Domain`, `URI`, memo data).

use crate::error::{CodecError, CodecResult};

pub fn utf8_to_hex(text: &str) -> String {
    hex::encode_upper(text.as_bytes())
}

pub fn hex_to_utf8(hex_text: &str) -> CodecResult<String> {
    let bytes = hex::decode(hex_text)
        .map_err(|e| CodecError::invalid("hex", format!("{hex_text:?}: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| CodecError::invalid("hex", format!("{hex_text:?} is not UTF-8: {e}")))
}
