//! Concise transaction identifiers.
//!
//! A CTID packs a ledger sequence, the transaction's index in that ledger and
//! the network id into 64 bits, rendered as 16 uppercase hex digits:
//!
//! ```text
//! 0xC | ledger_seq (28 bits) | txn_index (16 bits) | network_id (16 bits)
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{CodecError, CodecResult};

const MARKER: u64 = 0xC;
const MAX_LEDGER_SEQ: u32 = 0x0FFF_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ctid {
    pub ledger_seq: u32,
    pub txn_index: u16,
    pub network_id: u16,
}

impl Ctid {
    pub fn new(ledger_seq: u32, txn_index: u16, network_id: u16) -> CodecResult<Self> {
        if ledger_seq > MAX_LEDGER_SEQ {
            return Err(CodecError::out_of_range("ledgerSeq", ledger_seq, 0, MAX_LEDGER_SEQ));
        }
        Ok(Self {
            ledger_seq,
            txn_index,
            network_id,
        })
    }

    pub fn to_u64(self) -> u64 {
        ((MARKER << 28 | u64::from(self.ledger_seq)) << 32)
            | u64::from(self.txn_index) << 16
            | u64::from(self.network_id)
    }
}

impl fmt::Display for Ctid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}", self.to_u64())
    }
}

impl FromStr for Ctid {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_ctid(s)
    }
}

pub fn encode_ctid(ledger_seq: u32, txn_index: u32, network_id: u32) -> CodecResult<String> {
    let txn_index = u16::try_from(txn_index)
        .map_err(|_| CodecError::out_of_range("txnIndex", txn_index, 0, u16::MAX))?;
    let network_id = u16::try_from(network_id)
        .map_err(|_| CodecError::out_of_range("networkId", network_id, 0, u16::MAX))?;
    Ok(Ctid::new(ledger_seq, txn_index, network_id)?.to_string())
}

pub fn decode_ctid(ctid: &str) -> CodecResult<Ctid> {
    if ctid.len() != 16 || !ctid.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CodecError::invalid("CTID", format!("{ctid:?} is not 16 hex digits")));
    }
    let raw = u64::from_str_radix(ctid, 16)
        .map_err(|e| CodecError::invalid("CTID", format!("{ctid:?}: {e}")))?;
    if raw >> 60 != MARKER {
        return Err(CodecError::invalid("CTID", format!("{ctid:?} does not start with C")));
    }
    Ok(Ctid {
        ledger_seq: (raw >> 32) as u32 & MAX_LEDGER_SEQ,
        txn_index: (raw >> 16) as u16,
        network_id: raw as u16,
    })
}
