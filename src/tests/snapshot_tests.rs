use super::{init_logger, money, pid};
use crate::error::{LedgerError, SnapshotError, SplitError};
use crate::models::{Debt, SplitMethod};
use crate::snapshot::LedgerSnapshot;

const TRIP: &str = r#"{
    "name": "Trip",
    "members": ["ana", "ben", "cat"],
    "expenses": [
        { "description": "Dinner", "payer": "ana", "total": "90.00" },
        { "description": "Cabin", "payer": "ben", "total": "120", "method": "shares",
          "inputs": [{ "participant": "ana", "value": 1 }, { "participant": "cat", "value": "2" }],
          "settled": ["ana"] }
    ],
    "settlements": [{ "from": "cat", "to": "ana", "amount": "10.00", "note": "cash" }]
}"#;

#[test]
fn test_snapshot_replays_into_ledger() {
    init_logger();
    let ledger = LedgerSnapshot::from_json(TRIP)
        .unwrap()
        .into_ledger("USD")
        .unwrap();

    assert_eq!(ledger.name(), "Trip");
    assert_eq!(ledger.currency(), "USD");
    assert_eq!(ledger.expenses().count(), 2);

    let cabin = ledger.expenses().nth(1).unwrap();
    assert_eq!(cabin.method, SplitMethod::Shares);
    assert_eq!(cabin.shares.len(), 2);
    assert!(cabin.share_of(&pid("ana")).unwrap().settled);
    assert_eq!(cabin.share_of(&pid("cat")).unwrap().amount, money("80"));
    assert_eq!(ledger.settlements()[0].note.as_deref(), Some("cash"));

    let balances = ledger.balances();
    assert_eq!(balances.get(&pid("ana")), money("50"));
    assert_eq!(balances.get(&pid("ben")), money("50"));
    assert_eq!(balances.get(&pid("cat")), money("-100"));
    assert_eq!(
        ledger.debts(),
        vec![
            Debt::new(pid("cat"), pid("ana"), money("50")),
            Debt::new(pid("cat"), pid("ben"), money("50")),
        ]
    );
}

#[test]
fn test_snapshot_currency_overrides_default() {
    let ledger = LedgerSnapshot::from_json(r#"{ "name": "Flat", "currency": "EUR", "members": ["a"] }"#)
        .unwrap()
        .into_ledger("USD")
        .unwrap();
    assert_eq!(ledger.currency(), "EUR");
    assert!(ledger.balances().is_settled());
}

#[test]
fn test_unknown_method_reports_expense_index() {
    let raw = r#"{
        "name": "Flat",
        "members": ["a", "b"],
        "expenses": [
            { "description": "Rent", "payer": "a", "total": "10" },
            { "description": "Power", "payer": "a", "total": "10", "method": "byweight" }
        ]
    }"#;
    let result = LedgerSnapshot::from_json(raw).unwrap().into_ledger("USD");
    match result {
        Err(SnapshotError::Method { index, source }) => {
            assert_eq!(index, 1);
            assert_eq!(source, SplitError::InvalidMethod("byweight".to_string()));
        }
        other => panic!("expected method error, got {other:?}"),
    }
}

#[test]
fn test_ledger_errors_propagate() {
    let raw = r#"{
        "name": "Flat",
        "members": ["a", "b"],
        "settlements": [{ "from": "a", "to": "z", "amount": "5" }]
    }"#;
    let result = LedgerSnapshot::from_json(raw).unwrap().into_ledger("USD");
    assert!(matches!(
        result,
        Err(SnapshotError::Ledger(LedgerError::NotGroupMember(p))) if p == pid("z")
    ));
}

#[test]
fn test_malformed_snapshots_are_rejected() {
    assert!(matches!(
        LedgerSnapshot::from_json("{ \"name\": \"x\" }"),
        Err(SnapshotError::Json(_))
    ));
    assert!(matches!(
        LedgerSnapshot::from_json(
            r#"{ "name": "x", "members": ["a"], "expenses": [{ "description": "d", "payer": "a", "total": "1.005" }] }"#
        ),
        Err(SnapshotError::Json(_))
    ));
    assert!(matches!(
        LedgerSnapshot::load("/nonexistent/settleup/snapshot.json"),
        Err(SnapshotError::Io(_))
    ));
}
