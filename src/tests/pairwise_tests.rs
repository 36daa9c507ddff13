use super::{equal_expense, init_logger, inputs, money, pid, pids, settle_row};
use crate::engine::{compute_split, pairwise_balance};
use crate::models::{Money, SharedExpenseFact, SplitMethod};
use chrono::Utc;
use rust_decimal_macros::dec;

#[test]
fn test_direct_expenses_in_both_directions() {
    init_logger();
    let facts = vec![
        equal_expense("Groceries", "u", "60", &["u", "c"]),
        equal_expense("Cinema", "c", "24", &["u", "c"]),
    ];
    let balance = pairwise_balance(&pid("u"), &pid("c"), &facts);

    assert_eq!(balance.user_paid.len(), 1);
    assert_eq!(balance.contact_paid.len(), 1);
    assert_eq!(balance.user_paid_total, money("30"));
    assert_eq!(balance.user_paid_grand_total, money("60"));
    assert_eq!(balance.contact_paid_total, money("12"));
    assert_eq!(balance.contact_paid_grand_total, money("24"));
    assert_eq!(balance.net_balance, money("18"));
    assert!(balance.contact_owes_user());
}

#[test]
fn test_settled_shares_are_informational() {
    let mut groceries = equal_expense("Groceries", "u", "60", &["u", "c"]);
    settle_row(&mut groceries, "c");
    let facts = vec![groceries, equal_expense("Cinema", "c", "24", &["u", "c"])];

    let balance = pairwise_balance(&pid("u"), &pid("c"), &facts);
    assert_eq!(balance.user_paid_total, Money::ZERO);
    assert_eq!(balance.user_paid_settled, money("30"));
    assert_eq!(balance.user_paid_grand_total, money("60"));
    assert!(balance.user_paid[0].settled);
    assert_eq!(balance.net_balance, money("-12"));
}

#[test]
fn test_group_expense_counts_only_counterpart_share() {
    let split = compute_split(
        SplitMethod::Shares,
        money("100"),
        &pids(&["u", "c", "x"]),
        &inputs(&[("u", dec!(1)), ("c", dec!(2)), ("x", dec!(2))]),
    )
    .unwrap();
    let facts = vec![SharedExpenseFact::new("Cabin", pid("u"), split)];

    let balance = pairwise_balance(&pid("u"), &pid("c"), &facts);
    assert_eq!(balance.user_paid[0].share, money("40"));
    assert_eq!(balance.user_paid[0].total, money("100"));
    assert_eq!(balance.net_balance, money("40"));
}

#[test]
fn test_unrelated_and_zero_share_expenses_are_skipped() {
    let zero_share = compute_split(
        SplitMethod::Exact,
        money("10"),
        &pids(&["u", "c"]),
        &inputs(&[("u", dec!(10)), ("c", dec!(0))]),
    )
    .unwrap();
    let mut deleted = equal_expense("Old", "c", "8", &["u", "c"]);
    deleted.deleted_at = Some(Utc::now());
    let facts = vec![
        SharedExpenseFact::new("Solo", pid("u"), zero_share),
        equal_expense("Other", "x", "30", &["u", "c", "x"]),
        deleted,
    ];

    let balance = pairwise_balance(&pid("u"), &pid("c"), &facts);
    assert!(balance.user_paid.is_empty());
    assert!(balance.contact_paid.is_empty());
    assert!(balance.is_settled_up());
}

#[test]
fn test_views_are_mirror_images() {
    let facts = vec![
        equal_expense("Groceries", "u", "61", &["u", "c"]),
        equal_expense("Cinema", "c", "24", &["u", "c"]),
    ];
    let forward = pairwise_balance(&pid("u"), &pid("c"), &facts);
    let backward = pairwise_balance(&pid("c"), &pid("u"), &facts);

    assert_eq!(forward.net_balance, -backward.net_balance);
    assert_eq!(forward.user_paid, backward.contact_paid);
}
