//! Compiled-in flag definitions for the ledger types this crate knows about.

use crate::error::FlagError;
use crate::table::{FlagDef, FlagTable};
use crate::types::{LedgerEntryType, TransactionType};

type Defs = &'static [(&'static str, u32)];

pub const UNIVERSAL_FLAGS: Defs = &[
    ("tfFullyCanonicalSig", 0x8000_0000),
    ("tfInnerBatchTxn", 0x4000_0000),
];

pub const TRANSACTION_FLAGS: &[(TransactionType, Defs)] = &[
    (
        TransactionType::AccountSet,
        &[
            ("tfRequireDestTag", 0x0001_0000),
            ("tfOptionalDestTag", 0x0002_0000),
            ("tfRequireAuth", 0x0004_0000),
            ("tfOptionalAuth", 0x0008_0000),
            ("tfDisallowXRP", 0x0010_0000),
            ("tfAllowXRP", 0x0020_0000),
        ],
    ),
    (
        TransactionType::AMMDeposit,
        &[
            ("tfLPToken", 0x0001_0000),
            ("tfSingleAsset", 0x0008_0000),
            ("tfTwoAsset", 0x0010_0000),
            ("tfOneAssetLPToken", 0x0020_0000),
            ("tfLimitLPToken", 0x0040_0000),
            ("tfTwoAssetIfEmpty", 0x0080_0000),
        ],
    ),
    (
        TransactionType::AMMWithdraw,
        &[
            ("tfLPToken", 0x0001_0000),
            ("tfWithdrawAll", 0x0002_0000),
            ("tfOneAssetWithdrawAll", 0x0004_0000),
            ("tfSingleAsset", 0x0008_0000),
            ("tfTwoAsset", 0x0010_0000),
            ("tfOneAssetLPToken", 0x0020_0000),
            ("tfLimitLPToken", 0x0040_0000),
        ],
    ),
    (TransactionType::ClaimReward, &[("tfOptOut", 0x0000_0001)]),
    (
        TransactionType::EnableAmendment,
        &[("tfGotMajority", 0x0001_0000), ("tfLostMajority", 0x0002_0000)],
    ),
    (
        TransactionType::MPTokenAuthorize,
        &[("tfMPTUnauthorize", 0x0000_0001)],
    ),
    (
        TransactionType::MPTokenIssuanceCreate,
        &[
            ("tfMPTCanLock", 0x0000_0002),
            ("tfMPTRequireAuth", 0x0000_0004),
            ("tfMPTCanEscrow", 0x0000_0008),
            ("tfMPTCanTrade", 0x0000_0010),
            ("tfMPTCanTransfer", 0x0000_0020),
            ("tfMPTCanClawback", 0x0000_0040),
        ],
    ),
    (
        TransactionType::MPTokenIssuanceSet,
        &[("tfMPTLock", 0x0000_0001), ("tfMPTUnlock", 0x0000_0002)],
    ),
    (
        TransactionType::NFTokenCreateOffer,
        &[("tfSellNFToken", 0x0000_0001)],
    ),
    (
        TransactionType::NFTokenMint,
        &[
            ("tfBurnable", 0x0000_0001),
            ("tfOnlyXRP", 0x0000_0002),
            ("tfTrustLine", 0x0000_0004),
            ("tfTransferable", 0x0000_0008),
            ("tfMutable", 0x0000_0010),
        ],
    ),
    (
        TransactionType::OfferCreate,
        &[
            ("tfPassive", 0x0001_0000),
            ("tfImmediateOrCancel", 0x0002_0000),
            ("tfFillOrKill", 0x0004_0000),
            ("tfSell", 0x0008_0000),
        ],
    ),
    (
        TransactionType::Payment,
        &[
            ("tfNoRippleDirect", 0x0001_0000),
            ("tfPartialPayment", 0x0002_0000),
            ("tfLimitQuality", 0x0004_0000),
        ],
    ),
    (
        TransactionType::PaymentChannelClaim,
        &[("tfRenew", 0x0001_0000), ("tfClose", 0x0002_0000)],
    ),
    (
        TransactionType::TrustSet,
        &[
            ("tfSetfAuth", 0x0001_0000),
            ("tfSetNoRipple", 0x0002_0000),
            ("tfClearNoRipple", 0x0004_0000),
            ("tfSetFreeze", 0x0010_0000),
            ("tfClearFreeze", 0x0020_0000),
        ],
    ),
    (TransactionType::URITokenMint, &[("tfBurnable", 0x0000_0001)]),
];

pub const TRANSACTION_FLAG_INDICES: &[(TransactionType, Defs)] = &[(
    TransactionType::AccountSet,
    &[
        ("asfRequireDest", 1),
        ("asfRequireAuth", 2),
        ("asfDisallowXRP", 3),
        ("asfDisableMaster", 4),
        ("asfAccountTxnID", 5),
        ("asfNoFreeze", 6),
        ("asfGlobalFreeze", 7),
        ("asfDefaultRipple", 8),
        ("asfDepositAuth", 9),
        ("asfAuthorizedNFTokenMinter", 10),
        ("asfDisallowIncomingNFTokenOffer", 12),
        ("asfDisallowIncomingCheck", 13),
        ("asfDisallowIncomingPayChan", 14),
        ("asfDisallowIncomingTrustline", 15),
        ("asfAllowTrustLineClawback", 16),
    ],
)];

/// Transaction types whose `Flags` carry a single mode bit. Their bit flags
/// double as an index table, so the mode reads back as one name.
pub const MODE_FLAG_TYPES: &[TransactionType] =
    &[TransactionType::AMMDeposit, TransactionType::AMMWithdraw];

pub const LEDGER_ENTRY_FLAGS: &[(LedgerEntryType, Defs)] = &[
    (
        LedgerEntryType::AccountRoot,
        &[
            ("lsfPasswordSpent", 0x0001_0000),
            ("lsfRequireDestTag", 0x0002_0000),
            ("lsfRequireAuth", 0x0004_0000),
            ("lsfDisallowXRP", 0x0008_0000),
            ("lsfDisableMaster", 0x0010_0000),
            ("lsfNoFreeze", 0x0020_0000),
            ("lsfGlobalFreeze", 0x0040_0000),
            ("lsfDefaultRipple", 0x0080_0000),
            ("lsfDepositAuth", 0x0100_0000),
            ("lsfAMM", 0x0200_0000),
            ("lsfDisallowIncomingNFTokenOffer", 0x0400_0000),
            ("lsfDisallowIncomingCheck", 0x0800_0000),
            ("lsfDisallowIncomingPayChan", 0x1000_0000),
            ("lsfDisallowIncomingTrustline", 0x2000_0000),
            ("lsfAllowTrustLineClawback", 0x8000_0000),
        ],
    ),
    (LedgerEntryType::Credential, &[("lsfAccepted", 0x0001_0000)]),
    (
        LedgerEntryType::DirectoryNode,
        &[
            ("lsfNFTokenBuyOffers", 0x0000_0001),
            ("lsfNFTokenSellOffers", 0x0000_0002),
        ],
    ),
    (LedgerEntryType::NFTokenOffer, &[("lsfSellNFToken", 0x0000_0001)]),
    (
        LedgerEntryType::Offer,
        &[("lsfPassive", 0x0001_0000), ("lsfSell", 0x0002_0000)],
    ),
    (
        LedgerEntryType::RippleState,
        &[
            ("lsfLowReserve", 0x0001_0000),
            ("lsfHighReserve", 0x0002_0000),
            ("lsfLowAuth", 0x0004_0000),
            ("lsfHighAuth", 0x0008_0000),
            ("lsfLowNoRipple", 0x0010_0000),
            ("lsfHighNoRipple", 0x0020_0000),
            ("lsfLowFreeze", 0x0040_0000),
            ("lsfHighFreeze", 0x0080_0000),
        ],
    ),
    (LedgerEntryType::SignerList, &[("lsfOneOwnerCount", 0x0001_0000)]),
    (LedgerEntryType::URIToken, &[("lsfBurnable", 0x0000_0001)]),
];

pub(crate) fn to_defs(defs: Defs) -> Vec<FlagDef> {
    defs.iter().map(|(name, value)| FlagDef::new(*name, *value)).collect()
}

impl FlagTable {
    /// The compiled-in table.
    pub fn builtin() -> Result<FlagTable, FlagError> {
        let mut builder = FlagTable::builder().universal(to_defs(UNIVERSAL_FLAGS));
        for (t, defs) in TRANSACTION_FLAGS {
            builder = builder.flags(*t, to_defs(*defs));
        }
        for (t, defs) in LEDGER_ENTRY_FLAGS {
            builder = builder.flags(*t, to_defs(*defs));
        }
        for (t, defs) in TRANSACTION_FLAG_INDICES {
            builder = builder.indices(*t, to_defs(*defs));
        }
        for (t, defs) in TRANSACTION_FLAGS
            .iter()
            .filter(|(t, _)| MODE_FLAG_TYPES.contains(t))
        {
            builder = builder.indices(*t, to_defs(*defs));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_valid() {
        let table = FlagTable::builtin().unwrap();
        let offer = table.flags_for(TransactionType::OfferCreate.into()).unwrap();
        assert_eq!(offer.len(), 4 + UNIVERSAL_FLAGS.len());
        assert!(table.indices_for(TransactionType::AccountSet.into()).is_ok());
        assert!(table.indices_for(TransactionType::Payment.into()).is_err());
    }

    #[test]
    fn amm_modes_read_as_indices() {
        let table = FlagTable::builtin().unwrap();
        let deposit = table.indices_for(TransactionType::AMMDeposit.into()).unwrap();
        assert!(deposit.iter().any(|f| f.name == "tfTwoAssetIfEmpty" && f.value == 0x0080_0000));
        let withdraw = table.indices_for(TransactionType::AMMWithdraw.into()).unwrap();
        assert!(withdraw.iter().any(|f| f.name == "tfWithdrawAll" && f.value == 0x0002_0000));
    }
}
