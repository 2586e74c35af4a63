//! Transaction metadata: what a validated transaction did to the ledger.
//!
//! Metadata lists every ledger entry the transaction created, modified or
//! deleted. The helpers here derive balance changes, owner count changes,
//! created tickets, offer outcomes and hook executions from that list.

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::amount::NATIVE_SCALE;
use crate::error::{CodecError, CodecResult};
use crate::iou::{IouDecimal, Rounding};
use crate::structural::HOOK_EXECUTIONS;

const DISPLAY_DECIMALS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffType {
    Created,
    Modified,
    Deleted,
}

impl DiffType {
    pub fn as_str(self) -> &'static str {
        match self {
            DiffType::Created => "CreatedNode",
            DiffType::Modified => "ModifiedNode",
            DiffType::Deleted => "DeletedNode",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "CreatedNode" => Some(DiffType::Created),
            "ModifiedNode" => Some(DiffType::Modified),
            "DeletedNode" => Some(DiffType::Deleted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AffectedNode {
    pub diff: DiffType,
    pub ledger_entry_type: Option<String>,
    pub ledger_index: Option<String>,
    pub new_fields: Option<Map<String, Value>>,
    pub final_fields: Option<Map<String, Value>>,
    pub previous_fields: Option<Map<String, Value>>,
}

impl AffectedNode {
    fn is(&self, entry_type: &str) -> bool {
        self.ledger_entry_type.as_deref() == Some(entry_type)
    }

    /// Fields describing the entry after the transaction.
    fn current_fields(&self) -> Option<&Map<String, Value>> {
        match self.diff {
            DiffType::Created => self.new_fields.as_ref(),
            DiffType::Modified | DiffType::Deleted => self.final_fields.as_ref(),
        }
    }

    fn account(&self) -> Option<&str> {
        self.current_fields()?.get("Account")?.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BalanceAction {
    Inc,
    Dec,
}

impl BalanceAction {
    fn of(negative: bool) -> Self {
        if negative {
            BalanceAction::Dec
        } else {
            BalanceAction::Inc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BalanceAction::Inc => "INC",
            BalanceAction::Dec => "DEC",
        }
    }
}

impl fmt::Display for BalanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceChange {
    pub currency: String,
    pub issuer: Option<String>,
    /// Absolute change, rounded half-up to 8 decimals.
    pub value: String,
    pub action: BalanceAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerCountChange {
    pub address: String,
    pub value: u64,
    pub action: BalanceAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfferStatus {
    Created,
    PartiallyFilled,
    Filled,
    Cancelled,
    Killed,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionMeta {
    nodes: Vec<AffectedNode>,
    hook_executions: Vec<Value>,
    native_currency: String,
}

impl TransactionMeta {
    /// `native_currency` is the code reported for native balance changes.
    pub fn from_value(meta: &Value, native_currency: &str) -> CodecResult<Self> {
        let nodes = match meta.get("AffectedNodes") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(parse_node)
                .collect::<CodecResult<Vec<_>>>()?,
            Some(other) => {
                return Err(CodecError::invalid(
                    "AffectedNodes",
                    format!("expected an array, got {other}"),
                ))
            }
        };
        let hook_executions = match meta.get("HookExecutions") {
            None | Some(Value::Null) => Vec::new(),
            Some(wire) => HOOK_EXECUTIONS.unwrap(wire)?,
        };
        Ok(Self {
            nodes,
            hook_executions,
            native_currency: native_currency.to_string(),
        })
    }

    pub fn nodes(&self) -> &[AffectedNode] {
        &self.nodes
    }

    /// Balance changes per address, in order of first appearance. Changes of
    /// the same currency in the same direction are summed.
    pub fn balance_changes(&self) -> CodecResult<IndexMap<String, Vec<BalanceChange>>> {
        let mut raw: Vec<(String, BalanceChange)> = Vec::new();
        for node in &self.nodes {
            if node.is("AccountRoot") {
                raw.extend(self.native_change(node)?);
            } else if node.is("RippleState") {
                raw.extend(trustline_changes(node)?);
            }
        }

        let mut grouped: IndexMap<String, Vec<BalanceChange>> = IndexMap::new();
        for (address, change) in raw {
            let changes = grouped.entry(address).or_default();
            match changes
                .iter_mut()
                .find(|c| c.action == change.action && c.currency == change.currency)
            {
                Some(existing) => {
                    let sum = parse_decimal(&existing.value)? + parse_decimal(&change.value)?;
                    existing.value = display(sum);
                }
                None => changes.push(change),
            }
        }
        Ok(grouped)
    }

    pub fn owner_count_changes(&self) -> Vec<OwnerCountChange> {
        self.nodes
            .iter()
            .filter(|n| n.diff == DiffType::Modified && n.is("AccountRoot"))
            .filter_map(|node| {
                let count = |fields: Option<&Map<String, Value>>| {
                    fields?.get("OwnerCount")?.as_i64()
                };
                let delta = count(node.final_fields.as_ref())? - count(node.previous_fields.as_ref())?;
                Some(OwnerCountChange {
                    address: node.account()?.to_string(),
                    value: delta.unsigned_abs(),
                    action: BalanceAction::of(delta < 0),
                })
            })
            .collect()
    }

    pub fn ticket_sequences(&self) -> Vec<u32> {
        self.nodes
            .iter()
            .filter(|n| n.diff == DiffType::Created && n.is("Ticket"))
            .filter_map(|n| n.new_fields.as_ref()?.get("TicketSequence")?.as_u64())
            .filter_map(|seq| u32::try_from(seq).ok())
            .collect()
    }

    /// What happened to the offer `offer_index` placed by `owner`.
    ///
    /// An offer that never reached the ledger was either filled in full or
    /// killed; a trust line change of the owner tells the two apart.
    pub fn offer_status(&self, owner: &str, offer_index: &str) -> OfferStatus {
        let status = self
            .nodes
            .iter()
            .find(|n| n.is("Offer") && n.ledger_index.as_deref() == Some(offer_index))
            .map_or(OfferStatus::Unknown, node_offer_status);

        if !matches!(status, OfferStatus::Created | OfferStatus::Unknown) {
            return status;
        }
        let owner_trustline_moved = self.nodes.iter().any(|n| {
            n.diff == DiffType::Modified
                && n.is("RippleState")
                && ["HighLimit", "LowLimit"].iter().any(|side| {
                    n.final_fields
                        .as_ref()
                        .and_then(|f| f.get(*side)?.get("issuer")?.as_str())
                        == Some(owner)
                })
        });
        match (status, owner_trustline_moved) {
            (OfferStatus::Unknown, true) => OfferStatus::Filled,
            (OfferStatus::Unknown, false) => OfferStatus::Killed,
            (OfferStatus::Created, true) => OfferStatus::PartiallyFilled,
            (status, _) => status,
        }
    }

    /// Hook executions reported in the metadata, envelope removed.
    pub fn hook_executions(&self) -> &[Value] {
        &self.hook_executions
    }

    /// Transactions emitted by hooks, from created `EmittedTxn` entries.
    pub fn emitted_transactions(&self) -> Vec<Value> {
        self.nodes
            .iter()
            .filter(|n| n.diff == DiffType::Created && n.is("EmittedTxn"))
            .filter_map(|n| n.new_fields.as_ref()?.get("EmittedTxn").cloned())
            .collect()
    }

    pub fn amm_account_id(&self) -> Option<&str> {
        let node = self.nodes.iter().find(|n| n.is("AMM"))?;
        match node.diff {
            DiffType::Created | DiffType::Modified => node.account(),
            DiffType::Deleted => None,
        }
    }

    fn native_change(&self, node: &AffectedNode) -> CodecResult<Option<(String, BalanceChange)>> {
        let Some(delta) = balance_delta(node)? else {
            return Ok(None);
        };
        let Some(address) = node.account() else {
            return Ok(None);
        };
        let native = delta.abs().shift(-i64::from(NATIVE_SCALE));
        Ok(Some((
            address.to_string(),
            BalanceChange {
                currency: self.native_currency.clone(),
                issuer: None,
                value: display(native),
                action: BalanceAction::of(delta.is_negative()),
            },
        )))
    }
}

fn parse_node(item: &Value) -> CodecResult<AffectedNode> {
    let (key, inner) = item
        .as_object()
        .and_then(|o| o.iter().next())
        .ok_or_else(|| CodecError::invalid("AffectedNodes", format!("{item} is not a node")))?;
    let diff = DiffType::parse_str(key)
        .ok_or_else(|| CodecError::invalid("AffectedNodes", format!("unknown node kind {key}")))?;
    let text = |name: &str| inner.get(name).and_then(Value::as_str).map(str::to_string);
    let fields = |name: &str| inner.get(name).and_then(Value::as_object).cloned();
    Ok(AffectedNode {
        diff,
        ledger_entry_type: text("LedgerEntryType"),
        ledger_index: text("LedgerIndex"),
        new_fields: fields("NewFields"),
        final_fields: fields("FinalFields"),
        previous_fields: fields("PreviousFields"),
    })
}

fn node_offer_status(node: &AffectedNode) -> OfferStatus {
    match node.diff {
        DiffType::Created => OfferStatus::Created,
        DiffType::Modified => OfferStatus::PartiallyFilled,
        DiffType::Deleted => {
            let had_taker_pays = node
                .previous_fields
                .as_ref()
                .is_some_and(|f| f.contains_key("TakerPays"));
            if had_taker_pays {
                OfferStatus::Filled
            } else {
                OfferStatus::Cancelled
            }
        }
    }
}

/// Change of the `Balance` field; deleted entries report none.
fn balance_delta(node: &AffectedNode) -> CodecResult<Option<IouDecimal>> {
    fn balance(fields: Option<&Map<String, Value>>) -> Option<&Value> {
        fields?.get("Balance")
    }
    let delta = match node.diff {
        DiffType::Created => match balance(node.new_fields.as_ref()) {
            Some(new) => Some(balance_value(new)?),
            None => None,
        },
        DiffType::Modified => match (
            balance(node.final_fields.as_ref()),
            balance(node.previous_fields.as_ref()),
        ) {
            (Some(after), Some(before)) => Some(balance_value(after)? - balance_value(before)?),
            _ => None,
        },
        DiffType::Deleted => None,
    };
    Ok(delta.filter(|d| !d.is_zero()))
}

fn balance_value(balance: &Value) -> CodecResult<IouDecimal> {
    let text = match balance {
        Value::String(s) => s.as_str(),
        Value::Object(o) => o.get("value").and_then(Value::as_str).ok_or_else(|| {
            CodecError::invalid("Balance", format!("{balance} has no string value"))
        })?,
        other => return Err(CodecError::invalid("Balance", format!("unexpected {other}"))),
    };
    parse_decimal(text)
}

/// Trust line balances are stored from the low account's side. Both sides
/// are reported: the low account holding against the high account, then the
/// reverse.
fn trustline_changes(node: &AffectedNode) -> CodecResult<Vec<(String, BalanceChange)>> {
    let Some(delta) = balance_delta(node)? else {
        return Ok(Vec::new());
    };
    let Some(fields) = node.current_fields() else {
        return Ok(Vec::new());
    };
    let issuer_of = |side: &str| fields.get(side)?.get("issuer")?.as_str().map(str::to_string);
    let (Some(low), Some(high)) = (issuer_of("LowLimit"), issuer_of("HighLimit")) else {
        return Ok(Vec::new());
    };
    let currency = fields
        .get("Balance")
        .and_then(|b| b.get("currency"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let value = display(delta.abs());
    let low_action = BalanceAction::of(delta.is_negative());
    let high_action = BalanceAction::of(!delta.is_negative());
    Ok(vec![
        (
            low.clone(),
            BalanceChange {
                currency: currency.clone(),
                issuer: Some(high.clone()),
                value: value.clone(),
                action: low_action,
            },
        ),
        (
            high,
            BalanceChange {
                currency,
                issuer: Some(low),
                value,
                action: high_action,
            },
        ),
    ])
}

/// Balances are plain or scientific and may span the full issued range.
fn parse_decimal(text: &str) -> CodecResult<IouDecimal> {
    IouDecimal::parse("Balance", text)
}

fn display(value: IouDecimal) -> String {
    value
        .round_dp(DISPLAY_DECIMALS, Rounding::MidpointAwayFromZero)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(nodes: Value) -> TransactionMeta {
        TransactionMeta::from_value(&json!({"AffectedNodes": nodes}), "XRP").unwrap()
    }

    #[test]
    fn native_balance_change() {
        let meta = meta(json!([
            {"ModifiedNode": {
                "LedgerEntryType": "AccountRoot",
                "FinalFields": {"Account": "rA", "Balance": "99999988"},
                "PreviousFields": {"Balance": "100000000"}
            }}
        ]));
        let changes = meta.balance_changes().unwrap();
        assert_eq!(
            changes["rA"],
            [BalanceChange {
                currency: "XRP".into(),
                issuer: None,
                value: "0.000012".into(),
                action: BalanceAction::Dec,
            }]
        );
    }

    #[test]
    fn trust_line_balances_span_the_issued_range() {
        let line = |before: &str, after: &str| {
            json!({"ModifiedNode": {
                "LedgerEntryType": "RippleState",
                "FinalFields": {
                    "Balance": {"currency": "USD", "value": after},
                    "LowLimit": {"issuer": "rLow"},
                    "HighLimit": {"issuer": "rHigh"}
                },
                "PreviousFields": {"Balance": {"currency": "USD", "value": before}}
            }})
        };
        let changes = meta(json!([line("0", "-9.999999999999999e85")]))
            .balance_changes()
            .unwrap();
        assert_eq!(changes["rLow"][0].value, format!("9999999999999999{}", "0".repeat(70)));
        assert_eq!(changes["rLow"][0].action, BalanceAction::Dec);
        assert_eq!(changes["rHigh"][0].action, BalanceAction::Inc);

        let changes = meta(json!([line("1.5e-40", "1e-8")])).balance_changes().unwrap();
        assert_eq!(changes["rLow"][0].value, "0.00000001");
        assert_eq!(changes["rLow"][0].action, BalanceAction::Inc);
    }

    #[test]
    fn deleted_and_unchanged_nodes_have_no_balance_change() {
        let meta = meta(json!([
            {"DeletedNode": {
                "LedgerEntryType": "AccountRoot",
                "FinalFields": {"Account": "rGone", "Balance": "0"},
                "PreviousFields": {"Balance": "20000000"}
            }},
            {"ModifiedNode": {
                "LedgerEntryType": "AccountRoot",
                "FinalFields": {"Account": "rSame", "Balance": "5"},
                "PreviousFields": {"Balance": "5"}
            }}
        ]));
        assert!(meta.balance_changes().unwrap().is_empty());
    }

    #[test]
    fn owner_count_and_tickets() {
        let meta = meta(json!([
            {"ModifiedNode": {
                "LedgerEntryType": "AccountRoot",
                "FinalFields": {"Account": "rA", "OwnerCount": 3},
                "PreviousFields": {"OwnerCount": 5}
            }},
            {"CreatedNode": {"LedgerEntryType": "Ticket", "NewFields": {"TicketSequence": 11}}},
            {"CreatedNode": {"LedgerEntryType": "Ticket", "NewFields": {"TicketSequence": 12}}}
        ]));
        assert_eq!(
            meta.owner_count_changes(),
            [OwnerCountChange {
                address: "rA".into(),
                value: 2,
                action: BalanceAction::Dec,
            }]
        );
        assert_eq!(meta.ticket_sequences(), [11, 12]);
    }

    #[test]
    fn deleted_offer_with_taker_pays_was_filled() {
        let meta = meta(json!([
            {"DeletedNode": {
                "LedgerEntryType": "Offer",
                "LedgerIndex": "OFFER1",
                "PreviousFields": {"TakerPays": "10"}
            }},
            {"DeletedNode": {"LedgerEntryType": "Offer", "LedgerIndex": "OFFER2"}}
        ]));
        assert_eq!(meta.offer_status("rA", "OFFER1"), OfferStatus::Filled);
        assert_eq!(meta.offer_status("rA", "OFFER2"), OfferStatus::Cancelled);
        assert_eq!(meta.offer_status("rA", "OFFER3"), OfferStatus::Killed);
    }

    #[test]
    fn amm_account() {
        let meta = meta(json!([
            {"CreatedNode": {"LedgerEntryType": "AMM", "NewFields": {"Account": "rAMM"}}}
        ]));
        assert_eq!(meta.amm_account_id(), Some("rAMM"));
    }

    #[test]
    fn malformed_nodes_are_rejected() {
        assert!(TransactionMeta::from_value(&json!({"AffectedNodes": [{"Weird": {}}]}), "XRP").is_err());
        assert!(TransactionMeta::from_value(&json!({"AffectedNodes": {}}), "XRP").is_err());
        assert!(TransactionMeta::from_value(&json!({}), "XRP").unwrap().nodes().is_empty());
    }
}
