use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlagError {
    /// The record has neither `TransactionType` nor `LedgerEntryType` yet.
    #[error("flags need a TransactionType or LedgerEntryType on the enclosing record")]
    MissingDiscriminator,
    #[error("type {0} has no flag table entry")]
    UnknownType(String),
    #[error("flag {flag} is not defined for {discriminator}")]
    UnknownFlag { discriminator: String, flag: String },
    #[error("invalid flag table: {0}")]
    InvalidTable(String),
}
