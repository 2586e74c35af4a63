//! ledger-codec-flags - per-type flag tables for ledger records.
//!
//! A transaction's or ledger entry's `Flags` field is a `u32` bitmask whose
//! meaning depends on the record's type. [`FlagTable`] holds the name -> bit
//! mapping for every known type, and [`FlagCodec`] converts between the raw
//! bitmask and either a [`ParsedFlags`] map or a list of set flag names.
//!
//! The record type is read through [`DiscriminatorSource`], so flag fields can
//! only be (de)serialized once `TransactionType` or `LedgerEntryType` is on the
//! record.

mod builtin;
mod codec;
mod context;
mod definitions;
mod error;
mod table;
mod types;

pub use builtin::{
    LEDGER_ENTRY_FLAGS, MODE_FLAG_TYPES, TRANSACTION_FLAGS, TRANSACTION_FLAG_INDICES, UNIVERSAL_FLAGS,
};
pub use codec::{FlagCodec, ParsedFlags};
pub use context::{
    DiscriminatorField, DiscriminatorSource, LEDGER_ENTRY_TYPE_FIELD, TRANSACTION_TYPE_FIELD,
};
pub use definitions::{NetworkDefinitions, UNIVERSAL_KEY};
pub use error::FlagError;
pub use table::{FlagDef, FlagSet, FlagTable, FlagTableBuilder};
pub use types::{Discriminator, LedgerEntryType, TransactionType};
