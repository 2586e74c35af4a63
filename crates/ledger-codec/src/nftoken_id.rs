//! NFToken identifiers.
//!
//! A 256-bit NFTokenID is laid out as flags (16 bits), transfer fee
//! (16 bits), issuer account id (160 bits), scrambled taxon (32 bits) and
//! mint sequence (32 bits). The taxon is XORed with a value derived from the
//! sequence so that tokens of one taxon do not sort next to each other.

use ledger_codec_flags::{Discriminator, FlagCodec, TransactionType};
use rust_decimal::Decimal;

use crate::error::{CodecError, CodecResult};
use crate::rate::RateCodec;

const ID_BYTES: usize = 32;
const ISSUER_BYTES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NFTokenId {
    pub flags: u16,
    pub transfer_fee: u16,
    pub issuer: [u8; ISSUER_BYTES],
    /// Unscrambled taxon.
    pub taxon: u32,
    pub sequence: u32,
}

fn taxon_mask(sequence: u32) -> u32 {
    384_160_001u32.wrapping_mul(sequence).wrapping_add(2459)
}

impl NFTokenId {
    pub fn issuer_hex(&self) -> String {
        hex::encode_upper(self.issuer)
    }

    /// The transfer fee as a decoded percentage value.
    pub fn transfer_fee_percent(&self) -> Decimal {
        RateCodec::TransferFee.decode(u32::from(self.transfer_fee))
    }

    /// Set token flags, named after the `NFTokenMint` flags they come from.
    pub fn flag_names(&self, codec: &FlagCodec<'_>) -> CodecResult<Vec<String>> {
        let context = Discriminator::Transaction(TransactionType::NFTokenMint);
        Ok(codec.decode_indices(&context, u32::from(self.flags))?)
    }
}

pub fn encode_nftoken_id(token: &NFTokenId) -> String {
    let mut bytes = Vec::with_capacity(ID_BYTES);
    bytes.extend_from_slice(&token.flags.to_be_bytes());
    bytes.extend_from_slice(&token.transfer_fee.to_be_bytes());
    bytes.extend_from_slice(&token.issuer);
    bytes.extend_from_slice(&(token.taxon ^ taxon_mask(token.sequence)).to_be_bytes());
    bytes.extend_from_slice(&token.sequence.to_be_bytes());
    hex::encode_upper(bytes)
}

pub fn decode_nftoken_id(id: &str) -> CodecResult<NFTokenId> {
    if id.len() != ID_BYTES * 2 {
        return Err(CodecError::invalid(
            "NFTokenID",
            format!("expected 64 hex digits, got {}", id.len()),
        ));
    }
    let mut bytes = [0u8; ID_BYTES];
    hex::decode_to_slice(id, &mut bytes)
        .map_err(|e| CodecError::invalid("NFTokenID", format!("{id:?}: {e}")))?;

    let u16_at = |i: usize| u16::from_be_bytes([bytes[i], bytes[i + 1]]);
    let u32_at =
        |i: usize| u32::from_be_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
    let mut issuer = [0u8; ISSUER_BYTES];
    issuer.copy_from_slice(&bytes[4..4 + ISSUER_BYTES]);
    let sequence = u32_at(28);
    Ok(NFTokenId {
        flags: u16_at(0),
        transfer_fee: u16_at(2),
        issuer,
        taxon: u32_at(24) ^ taxon_mask(sequence),
        sequence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_codec_flags::FlagTable;
    use rust_decimal_macros::dec;

    const TOKEN: &str = "000B013A95F14B0044F78A264E41713C64B5F89242540EE208C3098E00000D65";

    #[test]
    fn decodes_fields() {
        let token = decode_nftoken_id(TOKEN).unwrap();
        assert_eq!(token.flags, 11);
        assert_eq!(token.transfer_fee, 314);
        assert_eq!(token.issuer_hex(), "95F14B0044F78A264E41713C64B5F89242540EE2");
        assert_eq!(token.sequence, 3429);
        assert_eq!(token.taxon, 0x08C3_098E ^ 0xB448_8C00);
        assert_eq!(token.transfer_fee_percent(), dec!(0.314));
        assert_eq!(encode_nftoken_id(&token), TOKEN);
    }

    #[test]
    fn taxon_zero_scrambles_to_the_mask() {
        let token = NFTokenId {
            flags: 8,
            transfer_fee: 0,
            issuer: [0xAB; ISSUER_BYTES],
            taxon: 0,
            sequence: 0,
        };
        let id = encode_nftoken_id(&token);
        assert_eq!(&id[48..56], "0000099B");
        assert_eq!(decode_nftoken_id(&id).unwrap(), token);
    }

    #[test]
    fn names_token_flags() {
        let table = FlagTable::builtin().unwrap();
        let codec = FlagCodec::new(&table);
        let token = decode_nftoken_id(TOKEN).unwrap();
        assert_eq!(
            token.flag_names(&codec).unwrap(),
            ["tfBurnable", "tfOnlyXRP", "tfTransferable"]
        );
    }

    #[test]
    fn malformed_ids_are_invalid() {
        assert!(matches!(
            decode_nftoken_id("000B"),
            Err(CodecError::InvalidFormat { .. })
        ));
        let bad = format!("ZZ{}", &TOKEN[2..]);
        assert!(matches!(
            decode_nftoken_id(&bad),
            Err(CodecError::InvalidFormat { .. })
        ));
    }
}
