//! Closed sets of record discriminators.
//!
//! A record is either a transaction (keyed by its `TransactionType` field) or a
//! ledger entry (keyed by `LedgerEntryType`). The same name may appear in both
//! sets (`DepositPreauth`), so the field a name was read from is part of the
//! discriminator.

use std::fmt;
use std::str::FromStr;

use crate::error::FlagError;

macro_rules! name_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            pub fn parse_str(s: &str) -> Result<Self, FlagError> {
                match s {
                    $(stringify!($variant) => Ok($name::$variant),)+
                    other => Err(FlagError::UnknownType(other.to_string())),
                }
            }
        }

        impl FromStr for $name {
            type Err = FlagError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::parse_str(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

name_enum! {
    /// Genuine transaction types.
    pub enum TransactionType {
        Payment,
        TrustSet,
        AccountDelete,
        AccountSet,
        OfferCreate,
        OfferCancel,
        EscrowCreate,
        EscrowCancel,
        EscrowFinish,
        SetRegularKey,
        DelegateSet,
        SignerListSet,
        DepositPreauth,
        CheckCreate,
        CheckCash,
        CheckCancel,
        TicketCreate,
        PaymentChannelCreate,
        PaymentChannelClaim,
        PaymentChannelFund,
        NFTokenModify,
        NFTokenMint,
        NFTokenBurn,
        NFTokenCreateOffer,
        NFTokenAcceptOffer,
        NFTokenCancelOffer,
        SetHook,
        ClaimReward,
        Invoke,
        Import,
        URITokenMint,
        URITokenBurn,
        URITokenBuy,
        URITokenCreateSellOffer,
        URITokenCancelSellOffer,
        GenesisMint,
        EnableAmendment,
        AMMBid,
        AMMCreate,
        AMMDelete,
        AMMDeposit,
        AMMVote,
        AMMWithdraw,
        Remit,
        Clawback,
        DIDDelete,
        DIDSet,
        OracleSet,
        OracleDelete,
        MPTokenIssuanceCreate,
        MPTokenIssuanceDestroy,
        MPTokenIssuanceSet,
        MPTokenAuthorize,
        CredentialCreate,
        CredentialAccept,
        CredentialDelete,
        SetRemarks,
    }
}

name_enum! {
    /// Ledger entry (object) types.
    pub enum LedgerEntryType {
        AccountRoot,
        Amendments,
        AMM,
        Check,
        DepositPreauth,
        DirectoryNode,
        Escrow,
        FeeSettings,
        LedgerHashes,
        NegativeUNL,
        NFTokenOffer,
        URIToken,
        NFTokenPage,
        Offer,
        Ticket,
        PayChannel,
        RippleState,
        SignerList,
        EmittedTxn,
        Oracle,
        Delegate,
        Credential,
        DID,
    }
}

/// The discriminator selecting which flag table a record uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Discriminator {
    Transaction(TransactionType),
    LedgerEntry(LedgerEntryType),
}

impl Discriminator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discriminator::Transaction(t) => t.as_str(),
            Discriminator::LedgerEntry(t) => t.as_str(),
        }
    }

    pub fn is_transaction(&self) -> bool {
        matches!(self, Discriminator::Transaction(_))
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TransactionType> for Discriminator {
    fn from(value: TransactionType) -> Self {
        Self::Transaction(value)
    }
}

impl From<LedgerEntryType> for Discriminator {
    fn from(value: LedgerEntryType) -> Self {
        Self::LedgerEntry(value)
    }
}
