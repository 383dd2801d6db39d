use beanstream_api::types::{Records, Transaction};
use beanstream_api::ErrorEnvelope;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_transaction_full() {
    let json = load_fixture("transaction.json");
    let tx: Transaction = serde_json::from_str(&json).unwrap();
    assert_eq!(tx.id, "10000123");
    assert_eq!(tx.authorizing_merchant_id, Some(300200578));
    assert!(tx.is_approved());
    assert_eq!(tx.auth_code.as_deref(), Some("TEST"));
    assert_eq!(tx.transaction_type, "P");
    assert_eq!(tx.amount, 100.0);
    assert_eq!(tx.created.to_string(), "2024-06-02 10:15:14");

    let card = tx.card.as_ref().unwrap();
    assert_eq!(card.card_type.as_deref(), Some("VI"));
    assert_eq!(card.last_four.as_deref(), Some("1234"));

    let billing = tx.billing.as_ref().unwrap();
    assert_eq!(billing.city.as_deref(), Some("Victoria"));
    assert!(tx.shipping.is_none());

    assert_eq!(tx.adjusted_by.len(), 1);
    assert_eq!(tx.adjusted_by[0].id, 10000124);
    assert_eq!(tx.adjusted_by[0].adjustment_type, "R");
    assert_eq!(tx.adjusted_by[0].amount, 25.5);
}

#[test]
fn deserialize_records_keeps_order() {
    let json = load_fixture("records.json");
    let resp: Records = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.records.len(), 2);

    let declined = &resp.records[0];
    assert_eq!(declined.row_id, Some(1));
    assert_eq!(declined.trn_id, 10000125);
    assert!(!declined.is_approved());
    assert_eq!(declined.message_text.as_deref(), Some("DECLINE"));

    let approved = &resp.records[1];
    assert_eq!(approved.trn_id, 10000123);
    assert!(approved.is_approved());
    assert_eq!(approved.ref1.as_deref(), Some("abc"));
    assert!(approved.b_email.is_none());
}

#[test]
fn deserialize_empty_records() {
    let resp: Records = serde_json::from_str("{}").unwrap();
    assert!(resp.records.is_empty());
}

#[test]
fn deserialize_error_envelopes() {
    let envelope = ErrorEnvelope::parse(&load_fixture("error_validation.json")).unwrap();
    assert_eq!(envelope.category, 3);
    assert_eq!(envelope.code, 314);
    assert_eq!(envelope.reference.as_deref(), Some(""));
    assert_eq!(envelope.details[0].message, "Invalid date format");

    let envelope = ErrorEnvelope::parse(&load_fixture("error_user_facing.json")).unwrap();
    assert_eq!((envelope.category, envelope.code), (3, 52));
    assert!(envelope.details.is_empty());
}

#[test]
fn deserialize_missing_required_fields_returns_error() {
    let json = r#"{"approved": "1", "amount": 1.0}"#;
    let result = serde_json::from_str::<Transaction>(json);
    assert!(result.is_err());
}
