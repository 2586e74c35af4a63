//! Bitmask <-> named flag conversions.
//!
//! Decoding only reports bits the table defines. Bits outside the table are
//! dropped, so re-encoding a decoded value reproduces the raw integer only
//! when it contained no such bits.

use indexmap::IndexMap;

use crate::context::DiscriminatorSource;
use crate::error::FlagError;
use crate::table::{FlagSet, FlagTable};
use crate::types::Discriminator;

/// Flag name -> set, in the table's declared order.
pub type ParsedFlags = IndexMap<String, bool>;

#[derive(Debug, Clone, Copy)]
pub struct FlagCodec<'t> {
    table: &'t FlagTable,
}

impl<'t> FlagCodec<'t> {
    pub fn new(table: &'t FlagTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t FlagTable {
        self.table
    }

    fn resolve<C: DiscriminatorSource + ?Sized>(
        &self,
        context: &C,
    ) -> Result<(Discriminator, FlagSet<'t>), FlagError> {
        let discriminator = context.discriminator()?;
        let set = self.table.flags_for(discriminator)?;
        Ok((discriminator, set))
    }

    /// Every defined flag of the record's type, `true` where its bit is set.
    pub fn decode<C: DiscriminatorSource + ?Sized>(
        &self,
        context: &C,
        raw: u32,
    ) -> Result<ParsedFlags, FlagError> {
        let (discriminator, set) = self.resolve(context)?;
        trace_dropped(discriminator, raw, set.mask());
        Ok(set
            .iter()
            .map(|f| (f.name.clone(), raw & f.value != 0))
            .collect())
    }

    /// Names of the set flags, in the table's declared order (not bit order).
    pub fn decode_indices<C: DiscriminatorSource + ?Sized>(
        &self,
        context: &C,
        raw: u32,
    ) -> Result<Vec<String>, FlagError> {
        let (discriminator, set) = self.resolve(context)?;
        trace_dropped(discriminator, raw, set.mask());
        Ok(set
            .iter()
            .filter(|f| raw & f.value != 0)
            .map(|f| f.name.clone())
            .collect())
    }

    pub fn encode<C: DiscriminatorSource + ?Sized>(
        &self,
        context: &C,
        flags: &ParsedFlags,
    ) -> Result<u32, FlagError> {
        let (discriminator, set) = self.resolve(context)?;
        let mut raw = 0u32;
        for (name, enabled) in flags {
            let def = set.get(name).ok_or_else(|| unknown_flag(discriminator, name))?;
            if *enabled {
                raw |= def.value;
            }
        }
        Ok(raw)
    }

    pub fn encode_indices<C, S>(&self, context: &C, names: &[S]) -> Result<u32, FlagError>
    where
        C: DiscriminatorSource + ?Sized,
        S: AsRef<str>,
    {
        let (discriminator, set) = self.resolve(context)?;
        names.iter().try_fold(0u32, |raw, name| {
            let name = name.as_ref();
            let def = set.get(name).ok_or_else(|| unknown_flag(discriminator, name))?;
            Ok(raw | def.value)
        })
    }

    /// `SetFlag`/`ClearFlag`: one ordinal to its name.
    pub fn decode_index<C: DiscriminatorSource + ?Sized>(
        &self,
        context: &C,
        index: u32,
    ) -> Result<String, FlagError> {
        let discriminator = context.discriminator()?;
        self.table
            .indices_for(discriminator)?
            .iter()
            .find(|f| f.value == index)
            .map(|f| f.name.clone())
            .ok_or_else(|| unknown_flag(discriminator, &index.to_string()))
    }

    pub fn encode_index<C: DiscriminatorSource + ?Sized>(
        &self,
        context: &C,
        name: &str,
    ) -> Result<u32, FlagError> {
        let discriminator = context.discriminator()?;
        self.table
            .indices_for(discriminator)?
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value)
            .ok_or_else(|| unknown_flag(discriminator, name))
    }
}

fn unknown_flag(discriminator: Discriminator, flag: &str) -> FlagError {
    FlagError::UnknownFlag {
        discriminator: discriminator.to_string(),
        flag: flag.to_string(),
    }
}

fn trace_dropped(discriminator: Discriminator, raw: u32, mask: u32) {
    let dropped = raw & !mask;
    if dropped != 0 {
        tracing::debug!(
            discriminator = %discriminator,
            raw,
            dropped = format_args!("{dropped:#010x}"),
            "flag bits outside the table are dropped"
        );
    }
}
