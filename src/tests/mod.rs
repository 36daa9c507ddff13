mod config_tests;
mod debt_tests;
mod money_tests;
mod pairwise_tests;
mod snapshot_tests;

use crate::engine::compute_split;
use crate::models::{Money, ParticipantId, SettlementFact, SharedExpenseFact, SplitInput, SplitMethod};
use rust_decimal::Decimal;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn pid(id: &str) -> ParticipantId {
    ParticipantId::new(id)
}

pub fn pids(ids: &[&str]) -> Vec<ParticipantId> {
    ids.iter().copied().map(pid).collect()
}

pub fn money(amount: &str) -> Money {
    Money::parse(amount).unwrap()
}

pub fn inputs(values: &[(&str, Decimal)]) -> Vec<SplitInput> {
    values
        .iter()
        .map(|(id, value)| SplitInput::new(*id, *value))
        .collect()
}

pub fn equal_expense(description: &str, payer: &str, total: &str, among: &[&str]) -> SharedExpenseFact {
    let split = compute_split(SplitMethod::Equal, money(total), &pids(among), &[]).unwrap();
    SharedExpenseFact::new(description, pid(payer), split)
}

pub fn settlement(from: &str, to: &str, amount: &str) -> SettlementFact {
    SettlementFact::new(pid(from), pid(to), money(amount), None)
}

pub fn settle_row(expense: &mut SharedExpenseFact, participant: &str) {
    expense
        .shares
        .iter_mut()
        .find(|row| row.participant.as_str() == participant)
        .unwrap()
        .settled = true;
}
