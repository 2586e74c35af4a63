//! Known fields and the codec each one uses.

use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;
use crate::rate::RateCodec;
use crate::structural::{self, SingletonArray};

/// How a field's wire value maps to its app value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCodec {
    /// Bitmask to a full name -> bool map.
    Flags,
    /// Bitmask to the list of set flag names.
    FlagIndices,
    /// `SetFlag`/`ClearFlag` ordinal to one flag name.
    FlagIndex,
    Amount,
    Amounts,
    TradingFee,
    TransferFee,
    TransferRate,
    LedgerTime,
    Hex,
    Memos,
    Signers,
    SignerEntries,
    AuthAccounts,
    HookParameters,
}

impl FieldCodec {
    /// Whether the codec reads the record's discriminator.
    pub fn needs_discriminator(self) -> bool {
        matches!(
            self,
            FieldCodec::Flags | FieldCodec::FlagIndices | FieldCodec::FlagIndex
        )
    }

    pub fn rate(self) -> Option<RateCodec> {
        match self {
            FieldCodec::TradingFee => Some(RateCodec::TradingFee),
            FieldCodec::TransferFee => Some(RateCodec::TransferFee),
            FieldCodec::TransferRate => Some(RateCodec::TransferRate),
            _ => None,
        }
    }

    pub fn singleton(self) -> Option<SingletonArray> {
        match self {
            FieldCodec::Memos => Some(structural::MEMOS),
            FieldCodec::Signers => Some(structural::SIGNERS),
            FieldCodec::SignerEntries => Some(structural::SIGNER_ENTRIES),
            FieldCodec::AuthAccounts => Some(structural::AUTH_ACCOUNTS),
            FieldCodec::HookParameters => Some(structural::HOOK_PARAMETERS),
            _ => None,
        }
    }
}

macro_rules! fields {
    ($($variant:ident = $name:literal => $codec:ident,)+) => {
        /// A record field with a codec. Fields not listed here pass through
        /// record-level passes untouched.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Field {
            $($variant,)+
        }

        impl Field {
            pub const ALL: &'static [Field] = &[$(Field::$variant,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Field::$variant => $name,)+
                }
            }

            pub fn codec(self) -> FieldCodec {
                match self {
                    $(Field::$variant => FieldCodec::$codec,)+
                }
            }

            pub fn parse_str(name: &str) -> Option<Field> {
                match name {
                    $($name => Some(Field::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

fields! {
    Flags = "Flags" => Flags,
    SetFlag = "SetFlag" => FlagIndex,
    ClearFlag = "ClearFlag" => FlagIndex,

    Amount = "Amount" => Amount,
    Amount2 = "Amount2" => Amount,
    Fee = "Fee" => Amount,
    SendMax = "SendMax" => Amount,
    DeliverMin = "DeliverMin" => Amount,
    DeliverMax = "DeliverMax" => Amount,
    DeliveredAmount = "DeliveredAmount" => Amount,
    TakerGets = "TakerGets" => Amount,
    TakerPays = "TakerPays" => Amount,
    Balance = "Balance" => Amount,
    LimitAmount = "LimitAmount" => Amount,
    LowLimit = "LowLimit" => Amount,
    HighLimit = "HighLimit" => Amount,
    EPrice = "EPrice" => Amount,
    LPTokenIn = "LPTokenIn" => Amount,
    LPTokenOut = "LPTokenOut" => Amount,
    BidMin = "BidMin" => Amount,
    BidMax = "BidMax" => Amount,
    NFTokenBrokerFee = "NFTokenBrokerFee" => Amount,
    Amounts = "Amounts" => Amounts,

    TradingFee = "TradingFee" => TradingFee,
    TransferFee = "TransferFee" => TransferFee,
    TransferRate = "TransferRate" => TransferRate,

    Expiration = "Expiration" => LedgerTime,
    CancelAfter = "CancelAfter" => LedgerTime,
    FinishAfter = "FinishAfter" => LedgerTime,
    Date = "date" => LedgerTime,

    Domain = "Domain" => Hex,
    Uri = "URI" => Hex,

    Memos = "Memos" => Memos,
    Signers = "Signers" => Signers,
    SignerEntries = "SignerEntries" => SignerEntries,
    AuthAccounts = "AuthAccounts" => AuthAccounts,
    HookParameters = "HookParameters" => HookParameters,
}

impl FromStr for Field {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::parse_str(s).ok_or_else(|| CodecError::invalid("field", format!("{s} has no codec")))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
