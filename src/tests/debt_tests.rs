use super::{equal_expense, init_logger, money, pid};
use crate::engine::{aggregate, simplify};
use crate::models::{Debt, NetBalances};

fn balances(entries: &[(&str, &str)]) -> NetBalances {
    entries
        .iter()
        .map(|(id, amount)| (pid(id), money(amount)))
        .collect()
}

fn settle_all(mut balances: NetBalances, debts: &[Debt]) -> NetBalances {
    for debt in debts {
        balances.apply(debt);
    }
    balances
}

#[test]
fn test_three_way_dinner_settles_to_payer() {
    init_logger();
    let expenses = vec![equal_expense("Dinner", "a", "100", &["a", "b", "c"])];
    let balances = aggregate(&expenses, &[]);
    let debts = simplify(&balances);

    assert_eq!(
        debts,
        vec![
            Debt::new(pid("b"), pid("a"), money("33.33")),
            Debt::new(pid("c"), pid("a"), money("33.33")),
        ]
    );
    assert!(settle_all(balances, &debts).is_settled());
}

#[test]
fn test_equal_creditors_prefer_smaller_id() {
    let debts = simplify(&balances(&[("b", "10"), ("a", "10"), ("c", "-20")]));
    assert_eq!(
        debts,
        vec![
            Debt::new(pid("c"), pid("a"), money("10")),
            Debt::new(pid("c"), pid("b"), money("10")),
        ]
    );
}

#[test]
fn test_largest_debtor_pays_largest_creditor_first() {
    let input = balances(&[("a", "5"), ("b", "45"), ("c", "-30"), ("d", "-20")]);
    let debts = simplify(&input);

    assert_eq!(debts[0], Debt::new(pid("c"), pid("b"), money("30")));
    assert!(debts.iter().all(|debt| debt.amount.is_positive() && debt.from != debt.to));
    assert!(settle_all(input, &debts).is_settled());
}

#[test]
fn test_single_creditor_needs_one_transfer_per_debtor() {
    let input = balances(&[("a", "-7"), ("b", "-3"), ("c", "12"), ("d", "-2")]);
    let debts = simplify(&input);

    assert_eq!(debts.len(), input.debtors().count());
    assert!(debts.iter().all(|debt| debt.to == pid("c")));
    assert_eq!(debts[0], Debt::new(pid("a"), pid("c"), money("7")));
}

#[test]
fn test_greedy_uses_at_most_n_minus_one_transfers() {
    let input = balances(&[
        ("x", "3"),
        ("y", "3"),
        ("p", "-2"),
        ("q", "-2"),
        ("r", "-2"),
    ]);
    let debts = simplify(&input);

    assert_eq!(debts.len(), 4);
    assert!(settle_all(input, &debts).is_settled());
}

#[test]
fn test_settled_group_needs_no_transfers() {
    assert!(simplify(&NetBalances::new()).is_empty());
    assert!(simplify(&balances(&[("a", "0"), ("b", "0")])).is_empty());
}

#[test]
fn test_unbalanced_input_leaves_remainder_unsettled() {
    let debts = simplify(&balances(&[("a", "10"), ("b", "-4")]));
    assert_eq!(debts, vec![Debt::new(pid("b"), pid("a"), money("4"))]);
}

#[test]
fn test_simplify_is_deterministic() {
    let input = balances(&[
        ("d", "-12.50"),
        ("a", "40"),
        ("c", "-12.50"),
        ("b", "-15"),
    ]);
    assert_eq!(simplify(&input), simplify(&input));
    assert_eq!(simplify(&input)[0], Debt::new(pid("b"), pid("a"), money("15")));
}
