//! Field-level dispatch.
//!
//! [`FieldCodecRegistry`] maps every [`Field`] to its codec and runs it with
//! the enclosing record as context. Only the flag codecs look at the
//! context, and only through [`DiscriminatorSource`].

use ledger_codec_flags::{
    DiscriminatorSource, FlagCodec, FlagTable, LEDGER_ENTRY_TYPE_FIELD, TRANSACTION_TYPE_FIELD,
};
use serde_json::{Map, Value};

use crate::amount::{decode_amount, encode_amount, AmountValue};
use crate::date::{to_iso8601, to_ledger_time};
use crate::error::{CodecError, CodecResult};
use crate::field::{Field, FieldCodec};
use crate::hex_text::{hex_to_utf8, utf8_to_hex};
use crate::structural::AMOUNTS;
use crate::value::{AppRecord, AppValue};

const AMOUNT_ENTRY_FIELD: &str = "Amount";
const DISCRIMINATOR_FIELDS: [&str; 2] = [TRANSACTION_TYPE_FIELD, LEDGER_ENTRY_TYPE_FIELD];

#[derive(Debug, Clone, Copy)]
pub struct FieldCodecRegistry<'t> {
    flags: FlagCodec<'t>,
}

impl<'t> FieldCodecRegistry<'t> {
    pub fn new(table: &'t FlagTable) -> Self {
        Self {
            flags: FlagCodec::new(table),
        }
    }

    pub fn flag_codec(&self) -> FlagCodec<'t> {
        self.flags
    }

    pub fn codec_for(&self, name: &str) -> Option<FieldCodec> {
        Field::parse_str(name).map(Field::codec)
    }

    pub fn decode<C: DiscriminatorSource + ?Sized>(
        &self,
        context: &C,
        field: Field,
        wire: &Value,
    ) -> CodecResult<AppValue> {
        self.decode_with(field.codec(), field.as_str(), context, wire)
    }

    pub fn encode<C: DiscriminatorSource + ?Sized>(
        &self,
        context: &C,
        field: Field,
        value: &AppValue,
    ) -> CodecResult<Value> {
        self.encode_with(field.codec(), field.as_str(), context, value)
    }

    /// Runs `codec` on a field that may not be in [`Field`]. `name` is only
    /// used in error messages.
    pub fn decode_with<C: DiscriminatorSource + ?Sized>(
        &self,
        codec: FieldCodec,
        name: &'static str,
        context: &C,
        wire: &Value,
    ) -> CodecResult<AppValue> {
        if let Some(rate) = codec.rate() {
            return Ok(AppValue::Rate(rate.decode(wire_u32(name, wire)?)));
        }
        if let Some(array) = codec.singleton() {
            return array.unwrap(wire).map(AppValue::Objects);
        }
        match codec {
            FieldCodec::Flags => Ok(AppValue::Flags(
                self.flags.decode(context, wire_u32(name, wire)?)?,
            )),
            FieldCodec::FlagIndices => Ok(AppValue::FlagNames(
                self.flags.decode_indices(context, wire_u32(name, wire)?)?,
            )),
            FieldCodec::FlagIndex => Ok(AppValue::FlagName(
                self.flags.decode_index(context, wire_u32(name, wire)?)?,
            )),
            FieldCodec::Amount => decode_amount(wire).map(AppValue::Amount),
            FieldCodec::Amounts => AMOUNTS
                .unwrap(wire)?
                .iter()
                .map(|entry| {
                    entry
                        .get(AMOUNT_ENTRY_FIELD)
                        .ok_or_else(|| {
                            CodecError::invalid(name, "amount entry has no Amount field")
                        })
                        .and_then(decode_amount)
                })
                .collect::<CodecResult<Vec<_>>>()
                .map(AppValue::Amounts),
            FieldCodec::LedgerTime => to_iso8601(wire_u32(name, wire)?).map(AppValue::Date),
            FieldCodec::Hex => hex_to_utf8(wire_str(name, wire)?).map(AppValue::Text),
            _ => Err(CodecError::invalid(name, format!("{codec:?} has no decoder"))),
        }
    }

    pub fn encode_with<C: DiscriminatorSource + ?Sized>(
        &self,
        codec: FieldCodec,
        name: &'static str,
        context: &C,
        value: &AppValue,
    ) -> CodecResult<Value> {
        let mismatch = || {
            CodecError::invalid(
                name,
                format!("{codec:?} cannot encode a {} value", value.kind()),
            )
        };
        if let Some(rate) = codec.rate() {
            let AppValue::Rate(decoded) = value else {
                return Err(mismatch());
            };
            return rate.encode(*decoded).map(Value::from);
        }
        if let Some(array) = codec.singleton() {
            let AppValue::Objects(items) = value else {
                return Err(mismatch());
            };
            return array.wrap(items);
        }
        match (codec, value) {
            (FieldCodec::Flags, AppValue::Flags(flags)) => {
                Ok(Value::from(self.flags.encode(context, flags)?))
            }
            (FieldCodec::FlagIndices, AppValue::FlagNames(names)) => {
                Ok(Value::from(self.flags.encode_indices(context, names.as_slice())?))
            }
            (FieldCodec::FlagIndex, AppValue::FlagName(flag)) => {
                Ok(Value::from(self.flags.encode_index(context, flag)?))
            }
            (FieldCodec::Amount, AppValue::Amount(amount)) => encode_amount(amount),
            (FieldCodec::Amounts, AppValue::Amounts(amounts)) => {
                let entries = amounts
                    .iter()
                    .map(amount_entry)
                    .collect::<CodecResult<Vec<_>>>()?;
                AMOUNTS.wrap(&entries)
            }
            (FieldCodec::LedgerTime, AppValue::Date(iso)) => to_ledger_time(iso).map(Value::from),
            (FieldCodec::Hex, AppValue::Text(text)) => Ok(Value::String(utf8_to_hex(text))),
            _ => Err(mismatch()),
        }
    }

    /// Decodes every known field of a wire record, with the record itself as
    /// context. Unknown fields are kept as [`AppValue::Raw`].
    pub fn decode_record(&self, record: &Map<String, Value>) -> CodecResult<AppRecord> {
        record
            .iter()
            .map(|(name, wire)| {
                let value = match Field::parse_str(name) {
                    Some(field) => self.decode(record, field, wire).inspect_err(|err| {
                        tracing::debug!(field = name.as_str(), error = %err, "field decode failed");
                    })?,
                    None => AppValue::Raw(wire.clone()),
                };
                Ok::<_, CodecError>((name.clone(), value))
            })
            .collect()
    }

    /// Encodes a record back to wire form. Discriminators are written first so
    /// flag fields can read them from the partially built output.
    pub fn encode_record(&self, record: &AppRecord) -> CodecResult<Map<String, Value>> {
        let mut out = Map::new();
        for name in DISCRIMINATOR_FIELDS {
            if let Some(value) = record.get(name) {
                let AppValue::Raw(wire) = value else {
                    return Err(CodecError::invalid(
                        "record",
                        format!("{name} must be a raw string, got a {} value", value.kind()),
                    ));
                };
                out.insert(name.to_string(), wire.clone());
            }
        }
        for (name, value) in record {
            if DISCRIMINATOR_FIELDS.contains(&name.as_str()) {
                continue;
            }
            let wire = match (Field::parse_str(name), value) {
                (Some(field), value) => self.encode(&out, field, value).inspect_err(|err| {
                    tracing::debug!(field = name.as_str(), error = %err, "field encode failed");
                })?,
                (None, AppValue::Raw(wire)) => wire.clone(),
                (None, value) => {
                    return Err(CodecError::invalid(
                        "record",
                        format!("{name} has no codec for a {} value", value.kind()),
                    ))
                }
            };
            out.insert(name.clone(), wire);
        }
        Ok(out)
    }
}

fn amount_entry(amount: &AmountValue) -> CodecResult<Value> {
    let mut entry = Map::new();
    entry.insert(AMOUNT_ENTRY_FIELD.to_string(), encode_amount(amount)?);
    Ok(Value::Object(entry))
}

fn wire_u32(name: &'static str, wire: &Value) -> CodecResult<u32> {
    wire.as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| CodecError::invalid(name, format!("expected an unsigned 32-bit integer, got {wire}")))
}

fn wire_str<'v>(name: &'static str, wire: &'v Value) -> CodecResult<&'v str> {
    wire.as_str()
        .ok_or_else(|| CodecError::invalid(name, format!("expected a string, got {wire}")))
}
