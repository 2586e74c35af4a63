//! ledger-codec - field codecs for ledger transactions and ledger entries.
//!
//! Converts fields between the ledger's wire JSON and typed app values:
//!
//! - [`amount`]: drops and native decimals, issued amounts, transfer-rate scaling
//! - [`iou`]: arbitrary-precision decimals for issued values
//! - [`date`]: ledger epoch seconds and ISO 8601
//! - [`rate`]: `TradingFee`, `TransferFee` and `TransferRate`
//! - [`structural`]: singleton-keyed arrays such as `Memos` and `Signers`
//! - [`registry`]: per-field dispatch and whole-record passes
//!
//! Flag fields go through [`ledger_codec_flags`], which this crate re-exports.
//! Every codec is a pure function of its inputs. The only shared state is the
//! [`FlagTable`], built once and passed in by reference.
//!
//! ```
//! use ledger_codec::{AppValue, Field, FieldCodecRegistry, FlagTable};
//! use serde_json::json;
//!
//! let table = FlagTable::builtin().unwrap();
//! let registry = FieldCodecRegistry::new(&table);
//! let tx = json!({"TransactionType": "Payment", "Fee": "12"});
//! let fee = registry.decode(&tx, Field::Fee, &tx["Fee"]).unwrap();
//! assert_eq!(fee, AppValue::Amount(ledger_codec::AmountValue::native("0.000012")));
//! ```

pub mod amount;
pub mod ctid;
pub mod currency;
pub mod date;
pub mod error;
pub mod field;
pub mod hex_text;
pub mod iou;
pub mod meta;
pub mod nftoken_id;
pub mod rate;
pub mod registry;
pub mod structural;
pub mod value;

pub use amount::{
    decode_amount, drops_to_native, encode_amount, native_to_drops, value_to_iou,
    with_transfer_rate, AmountValue, IssuedAmount,
};
pub use ctid::{decode_ctid, encode_ctid, Ctid};
pub use currency::normalize_currency_code;
pub use date::{to_iso8601, to_ledger_time, LEDGER_EPOCH_OFFSET};
pub use error::{CodecError, CodecResult};
pub use field::{Field, FieldCodec};
pub use hex_text::{hex_to_utf8, utf8_to_hex};
pub use iou::{IouDecimal, Rounding};
pub use meta::{BalanceAction, BalanceChange, OfferStatus, OwnerCountChange, TransactionMeta};
pub use nftoken_id::{decode_nftoken_id, encode_nftoken_id, NFTokenId};
pub use rate::RateCodec;
pub use registry::FieldCodecRegistry;
pub use structural::{AuthAccount, HookParameter, Memo, Signer, SignerEntry, SingletonArray};
pub use value::{AppRecord, AppValue};

pub use ledger_codec_flags::{
    Discriminator, DiscriminatorSource, FlagCodec, FlagTable, LedgerEntryType,
    NetworkDefinitions, ParsedFlags, TransactionType,
};
