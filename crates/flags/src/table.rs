//! The per-type bit flag table.
//!
//! Built once, validated at construction, then only read. Callers share it by
//! reference; nothing here is global.

use std::collections::HashMap;

use crate::error::FlagError;
use crate::types::{Discriminator, LedgerEntryType, TransactionType};

/// One named flag and its value.
///
/// In a bit table the value has exactly one bit set. In an index table
/// (`SetFlag`/`ClearFlag`) it is a small ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDef {
    pub name: String,
    pub value: u32,
}

impl FlagDef {
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// The flags that apply to one discriminator, in declared order: the
/// type-specific flags first, then the universal transaction flags.
#[derive(Debug, Clone, Copy)]
pub struct FlagSet<'t> {
    specific: &'t [FlagDef],
    universal: &'t [FlagDef],
}

impl<'t> FlagSet<'t> {
    pub fn iter(&self) -> impl Iterator<Item = &'t FlagDef> + 't {
        let (specific, universal) = (self.specific, self.universal);
        specific.iter().chain(universal.iter())
    }

    pub fn get(&self, name: &str) -> Option<&'t FlagDef> {
        self.iter().find(|f| f.name == name)
    }

    /// OR of every bit this set defines.
    pub fn mask(&self) -> u32 {
        self.iter().fold(0, |acc, f| acc | f.value)
    }

    pub fn len(&self) -> usize {
        self.specific.len() + self.universal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlagTable {
    universal: Vec<FlagDef>,
    flags: HashMap<Discriminator, Vec<FlagDef>>,
    indices: HashMap<Discriminator, Vec<FlagDef>>,
}

impl FlagTable {
    pub fn builder() -> FlagTableBuilder {
        FlagTableBuilder::default()
    }

    /// Bit flags for `discriminator`. Transaction types also get the
    /// universal flags.
    pub fn flags_for(&self, discriminator: Discriminator) -> Result<FlagSet<'_>, FlagError> {
        let specific = self
            .flags
            .get(&discriminator)
            .ok_or_else(|| FlagError::UnknownType(discriminator.to_string()))?;
        let universal: &[FlagDef] = if discriminator.is_transaction() {
            &self.universal
        } else {
            &[]
        };
        Ok(FlagSet {
            specific,
            universal,
        })
    }

    /// `SetFlag`/`ClearFlag` index table for `discriminator`.
    pub fn indices_for(&self, discriminator: Discriminator) -> Result<&[FlagDef], FlagError> {
        self.indices
            .get(&discriminator)
            .map(Vec::as_slice)
            .ok_or_else(|| FlagError::UnknownType(discriminator.to_string()))
    }

    pub fn universal(&self) -> &[FlagDef] {
        &self.universal
    }

    pub fn contains(&self, discriminator: Discriminator) -> bool {
        self.flags.contains_key(&discriminator)
    }
}

#[derive(Debug, Default)]
pub struct FlagTableBuilder {
    universal: Vec<FlagDef>,
    flags: Vec<(Discriminator, Vec<FlagDef>)>,
    indices: Vec<(Discriminator, Vec<FlagDef>)>,
}

impl FlagTableBuilder {
    pub fn universal(mut self, flags: Vec<FlagDef>) -> Self {
        self.universal = flags;
        self
    }

    pub fn flags(mut self, discriminator: impl Into<Discriminator>, flags: Vec<FlagDef>) -> Self {
        self.flags.push((discriminator.into(), flags));
        self
    }

    pub fn indices(mut self, discriminator: impl Into<Discriminator>, indices: Vec<FlagDef>) -> Self {
        self.indices.push((discriminator.into(), indices));
        self
    }

    /// Validates every table and gives every known type an entry. Transaction
    /// types without their own flags still decode the universal ones; ledger
    /// entry types without flags decode to an empty set.
    pub fn build(self) -> Result<FlagTable, FlagError> {
        check_bits("Universal", &self.universal, &[])?;

        let mut flags = HashMap::with_capacity(self.flags.len());
        for (discriminator, defs) in self.flags {
            let universal: &[FlagDef] = if discriminator.is_transaction() {
                &self.universal
            } else {
                &[]
            };
            check_bits(discriminator.as_str(), &defs, universal)?;
            if flags.insert(discriminator, defs).is_some() {
                return Err(FlagError::InvalidTable(format!(
                    "{discriminator} is declared more than once"
                )));
            }
        }
        for t in TransactionType::ALL {
            flags.entry(Discriminator::Transaction(*t)).or_default();
        }
        for t in LedgerEntryType::ALL {
            flags.entry(Discriminator::LedgerEntry(*t)).or_default();
        }

        let mut indices = HashMap::with_capacity(self.indices.len());
        for (discriminator, defs) in self.indices {
            check_indices(discriminator.as_str(), &defs)?;
            if indices.insert(discriminator, defs).is_some() {
                return Err(FlagError::InvalidTable(format!(
                    "{discriminator} indices are declared more than once"
                )));
            }
        }

        Ok(FlagTable {
            universal: self.universal,
            flags,
            indices,
        })
    }
}

fn check_bits(owner: &str, defs: &[FlagDef], universal: &[FlagDef]) -> Result<(), FlagError> {
    let mut seen = 0u32;
    for def in universal {
        seen |= def.value;
    }
    for (i, def) in defs.iter().enumerate() {
        if def.value.count_ones() != 1 {
            return Err(FlagError::InvalidTable(format!(
                "{owner}.{} = {:#x} must have exactly one bit set",
                def.name, def.value
            )));
        }
        if seen & def.value != 0 {
            return Err(FlagError::InvalidTable(format!(
                "{owner}.{} = {:#x} overlaps another flag",
                def.name, def.value
            )));
        }
        if defs[..i].iter().chain(universal).any(|d| d.name == def.name) {
            return Err(FlagError::InvalidTable(format!(
                "{owner}.{} is declared more than once",
                def.name
            )));
        }
        seen |= def.value;
    }
    Ok(())
}

fn check_indices(owner: &str, defs: &[FlagDef]) -> Result<(), FlagError> {
    for (i, def) in defs.iter().enumerate() {
        if defs[..i]
            .iter()
            .any(|d| d.name == def.name || d.value == def.value)
        {
            return Err(FlagError::InvalidTable(format!(
                "{owner} index {} = {} is not unique",
                def.name, def.value
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs(items: &[(&str, u32)]) -> Vec<FlagDef> {
        items.iter().map(|(n, v)| FlagDef::new(*n, *v)).collect()
    }

    #[test]
    fn every_known_type_gets_an_entry() {
        let table = FlagTable::builder()
            .universal(defs(&[("tfFullyCanonicalSig", 0x8000_0000)]))
            .build()
            .unwrap();
        let set = table
            .flags_for(TransactionType::EscrowCancel.into())
            .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.mask(), 0x8000_0000);
        let ticket = table.flags_for(LedgerEntryType::Ticket.into()).unwrap();
        assert!(ticket.is_empty());
        assert_eq!(ticket.mask(), 0);
    }

    #[test]
    fn rejects_multi_bit_values() {
        let err = FlagTable::builder()
            .flags(TransactionType::Payment, defs(&[("tfBoth", 0b11)]))
            .build()
            .unwrap_err();
        assert!(matches!(err, FlagError::InvalidTable(_)));
    }

    #[test]
    fn rejects_zero_values() {
        let err = FlagTable::builder()
            .flags(LedgerEntryType::Offer, defs(&[("lsfNothing", 0)]))
            .build()
            .unwrap_err();
        assert!(matches!(err, FlagError::InvalidTable(_)));
    }

    #[test]
    fn rejects_overlap_with_universal() {
        let err = FlagTable::builder()
            .universal(defs(&[("tfFullyCanonicalSig", 0x8000_0000)]))
            .flags(TransactionType::Payment, defs(&[("tfHigh", 0x8000_0000)]))
            .build()
            .unwrap_err();
        assert!(matches!(err, FlagError::InvalidTable(_)));
    }

    #[test]
    fn ledger_entries_may_reuse_universal_bits() {
        let table = FlagTable::builder()
            .universal(defs(&[("tfFullyCanonicalSig", 0x8000_0000)]))
            .flags(
                LedgerEntryType::AccountRoot,
                defs(&[("lsfAllowTrustLineClawback", 0x8000_0000)]),
            )
            .build()
            .unwrap();
        let set = table.flags_for(LedgerEntryType::AccountRoot.into()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn rejects_duplicate_indices() {
        let err = FlagTable::builder()
            .indices(
                TransactionType::AccountSet,
                defs(&[("asfRequireDest", 1), ("asfRequireAuth", 1)]),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, FlagError::InvalidTable(_)));
    }
}
