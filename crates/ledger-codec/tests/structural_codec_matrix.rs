//! Structural codec matrix: singleton-keyed envelopes and hex text.

use ledger_codec::structural::{
    AMOUNTS, AUTH_ACCOUNTS, HOOK_PARAMETERS, MEMOS, SIGNERS, SIGNER_ENTRIES,
};
use ledger_codec::{
    hex_to_utf8, utf8_to_hex, AuthAccount, CodecError, HookParameter, Memo, Signer,
    SingletonArray,
};
use proptest::prelude::*;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

#[test]
fn every_envelope_uses_its_own_key() {
    let cases: [(SingletonArray, &str); 6] = [
        (MEMOS, "Memo"),
        (SIGNERS, "Signer"),
        (SIGNER_ENTRIES, "SignerEntry"),
        (AUTH_ACCOUNTS, "AuthAccount"),
        (HOOK_PARAMETERS, "HookParameter"),
        (AMOUNTS, "AmountEntry"),
    ];
    for (array, key) in cases {
        let wire = json!([{key: {"x": 1}}, {key: {"x": 2}}]);
        let flat = array.unwrap(&wire).unwrap();
        assert_eq!(flat, [json!({"x": 1}), json!({"x": 2})], "{key}");
        assert_eq!(array.wrap(&flat).unwrap(), wire, "{key}");
    }
}

#[test]
fn element_order_is_kept() {
    let wire = json!([{"Memo": {"n": 3}}, {"Memo": {"n": 1}}, {"Memo": {"n": 2}}]);
    let flat = MEMOS.unwrap(&wire).unwrap();
    let order: Vec<i64> = flat.iter().map(|m| m["n"].as_i64().unwrap()).collect();
    assert_eq!(order, [3, 1, 2]);
}

#[test]
fn envelope_errors_name_the_field() {
    let err = SIGNERS.unwrap(&json!([{"Signer": {}}, 5])).unwrap_err();
    assert_eq!(
        err,
        CodecError::InvalidFormat {
            field: "Signers",
            reason: "element 1 is not wrapped in Signer".into()
        }
    );
    assert!(matches!(
        HOOK_PARAMETERS.unwrap(&Value::Null),
        Err(CodecError::InvalidFormat { field: "HookParameters", .. })
    ));
}

// ---------------------------------------------------------------------------
// Typed elements
// ---------------------------------------------------------------------------

#[test]
fn typed_memos_keep_absent_fields_absent() {
    let wire = json!([{"Memo": {"MemoData": "68656C6C6F"}}]);
    let memos: Vec<Memo> = MEMOS.unwrap_as(&wire).unwrap();
    assert_eq!(
        memos,
        [Memo {
            memo_data: Some("68656C6C6F".into()),
            ..Memo::default()
        }]
    );
    assert_eq!(MEMOS.wrap_from(&memos).unwrap(), wire);
}

#[test]
fn typed_signers_and_parameters() {
    let signers = [Signer {
        account: "rSigner".into(),
        txn_signature: "3045".into(),
        signing_pub_key: "02AB".into(),
    }];
    assert_eq!(
        SIGNERS.wrap_from(&signers).unwrap(),
        json!([{"Signer": {"Account": "rSigner", "TxnSignature": "3045", "SigningPubKey": "02AB"}}])
    );

    let wire = json!([{"HookParameter": {"HookParameterName": "AA", "HookParameterValue": "BB"}}]);
    let params: Vec<HookParameter> = HOOK_PARAMETERS.unwrap_as(&wire).unwrap();
    assert_eq!(params[0].hook_parameter_name, "AA");

    let accounts: Vec<AuthAccount> = AUTH_ACCOUNTS
        .unwrap_as(&json!([{"AuthAccount": {"Account": "rA"}}, {"AuthAccount": {"Account": "rB"}}]))
        .unwrap();
    assert_eq!(accounts.len(), 2);
}

// ---------------------------------------------------------------------------
// Hex
// ---------------------------------------------------------------------------

#[test]
fn hex_examples() {
    assert_eq!(hex_to_utf8(&utf8_to_hex("hello")).unwrap(), "hello");
    assert_eq!(utf8_to_hex("example.com"), "6578616D706C652E636F6D");
    assert!(matches!(hex_to_utf8("ZZ"), Err(CodecError::InvalidFormat { .. })));
    assert!(matches!(hex_to_utf8("FFFE"), Err(CodecError::InvalidFormat { .. })));
}

proptest! {
    #[test]
    fn any_text_round_trips_through_hex(text in any::<String>()) {
        let encoded = utf8_to_hex(&text);
        prop_assert!(encoded.bytes().all(|b| !b.is_ascii_lowercase()));
        prop_assert_eq!(hex_to_utf8(&encoded).unwrap(), text);
    }
}
