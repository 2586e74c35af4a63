//! Read-only access to the discriminator of a partially built record.

use serde_json::{Map, Value};

use crate::error::FlagError;
use crate::types::{Discriminator, LedgerEntryType, TransactionType};

pub const TRANSACTION_TYPE_FIELD: &str = "TransactionType";
pub const LEDGER_ENTRY_TYPE_FIELD: &str = "LedgerEntryType";

/// The raw discriminator as it sits on the record, before it is checked
/// against the closed type sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscriminatorField<'a> {
    TransactionType(&'a str),
    LedgerEntryType(&'a str),
}

impl DiscriminatorField<'_> {
    pub fn resolve(self) -> Result<Discriminator, FlagError> {
        match self {
            DiscriminatorField::TransactionType(name) => {
                TransactionType::parse_str(name).map(Discriminator::Transaction)
            }
            DiscriminatorField::LedgerEntryType(name) => {
                LedgerEntryType::parse_str(name).map(Discriminator::LedgerEntry)
            }
        }
    }
}

/// Anything that can tell a codec which type the record it is working on has.
///
/// Codecs only ever read through this trait; they never see the rest of the
/// record.
pub trait DiscriminatorSource {
    fn discriminator_field(&self) -> Option<DiscriminatorField<'_>>;

    fn discriminator(&self) -> Result<Discriminator, FlagError> {
        self.discriminator_field()
            .ok_or(FlagError::MissingDiscriminator)?
            .resolve()
    }
}

impl DiscriminatorSource for Map<String, Value> {
    fn discriminator_field(&self) -> Option<DiscriminatorField<'_>> {
        if let Some(name) = self.get(TRANSACTION_TYPE_FIELD).and_then(Value::as_str) {
            return Some(DiscriminatorField::TransactionType(name));
        }
        self.get(LEDGER_ENTRY_TYPE_FIELD)
            .and_then(Value::as_str)
            .map(DiscriminatorField::LedgerEntryType)
    }
}

impl DiscriminatorSource for Value {
    fn discriminator_field(&self) -> Option<DiscriminatorField<'_>> {
        self.as_object().and_then(|m| m.discriminator_field())
    }
}

impl DiscriminatorSource for Discriminator {
    fn discriminator_field(&self) -> Option<DiscriminatorField<'_>> {
        Some(match self {
            Discriminator::Transaction(t) => DiscriminatorField::TransactionType(t.as_str()),
            Discriminator::LedgerEntry(t) => DiscriminatorField::LedgerEntryType(t.as_str()),
        })
    }

    fn discriminator(&self) -> Result<Discriminator, FlagError> {
        Ok(*self)
    }
}

impl<T: DiscriminatorSource + ?Sized> DiscriminatorSource for &T {
    fn discriminator_field(&self) -> Option<DiscriminatorField<'_>> {
        (**self).discriminator_field()
    }
}
