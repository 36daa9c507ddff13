use crate::models::{Debt, MemberSummary, Money, NetBalances, ParticipantId, SettlementFact, SharedExpenseFact};
use log::debug;
use std::collections::BTreeMap;

/// Folds expenses and settlements into one net balance per member.
///
/// The payer of an expense is credited its total and every share row is
/// debited from its participant. A row marked settled was paid back directly,
/// so it is dropped from both sides. A settlement credits `from` and debits
/// `to`. Deleted expenses are skipped. The result always sums to zero.
pub fn aggregate(expenses: &[SharedExpenseFact], settlements: &[SettlementFact]) -> NetBalances {
    let mut balances = NetBalances::new();

    for expense in expenses.iter().filter(|expense| !expense.is_deleted()) {
        balances.credit(&expense.payer, expense.total);
        for row in &expense.shares {
            if row.settled && row.participant != expense.payer {
                balances.touch(&row.participant);
                balances.debit(&expense.payer, row.amount);
            } else {
                balances.debit(&row.participant, row.amount);
            }
        }
    }

    for settlement in settlements {
        balances.credit(&settlement.from, settlement.amount);
        balances.debit(&settlement.to, settlement.amount);
    }

    debug_assert!(
        balances.total().is_zero(),
        "balances must net to zero, got {}",
        balances.total()
    );
    debug!(
        "Aggregated {} expenses and {} settlements into {} balances",
        expenses.len(),
        settlements.len(),
        balances.len()
    );
    balances
}

/// Breaks each member's net balance down into what they paid, owed, and
/// settled. `net` matches [`aggregate`] for the same facts.
pub fn summarize(
    expenses: &[SharedExpenseFact],
    settlements: &[SettlementFact],
) -> BTreeMap<ParticipantId, MemberSummary> {
    let mut summaries: BTreeMap<ParticipantId, MemberSummary> = BTreeMap::new();

    for expense in expenses.iter().filter(|expense| !expense.is_deleted()) {
        summaries.entry(expense.payer.clone()).or_default().paid += expense.total;
        for row in &expense.shares {
            summaries.entry(row.participant.clone()).or_default().share += row.amount;
            if row.settled && row.participant != expense.payer {
                summaries.entry(row.participant.clone()).or_default().repaid_by += row.amount;
                summaries.entry(expense.payer.clone()).or_default().repaid_to += row.amount;
            }
        }
    }

    for settlement in settlements {
        summaries.entry(settlement.from.clone()).or_default().sent += settlement.amount;
        summaries.entry(settlement.to.clone()).or_default().received += settlement.amount;
    }

    for summary in summaries.values_mut() {
        summary.net = summary.paid - summary.share - summary.repaid_to + summary.repaid_by
            + summary.sent
            - summary.received;
    }
    summaries
}

/// Unsimplified "who owes whom": every pending share owed to a payer, netted
/// per pair of members and reduced by settlements between them. Sorted by
/// debtor, then creditor.
pub fn pairwise_obligations(
    expenses: &[SharedExpenseFact],
    settlements: &[SettlementFact],
) -> Vec<Debt> {
    // (a, b) with a < b; positive means a owes b
    let mut pairs: BTreeMap<(ParticipantId, ParticipantId), Money> = BTreeMap::new();

    let mut owe = |debtor: &ParticipantId, creditor: &ParticipantId, amount: Money| {
        if debtor == creditor || amount.is_zero() {
            return;
        }
        if debtor < creditor {
            *pairs
                .entry((debtor.clone(), creditor.clone()))
                .or_insert(Money::ZERO) += amount;
        } else {
            *pairs
                .entry((creditor.clone(), debtor.clone()))
                .or_insert(Money::ZERO) -= amount;
        }
    };

    for expense in expenses.iter().filter(|expense| !expense.is_deleted()) {
        for row in expense.shares.iter().filter(|row| !row.settled) {
            owe(&row.participant, &expense.payer, row.amount);
        }
    }
    for settlement in settlements {
        owe(&settlement.to, &settlement.from, settlement.amount);
    }

    let mut obligations: Vec<Debt> = pairs
        .into_iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|((a, b), amount)| {
            if amount.is_positive() {
                Debt::new(a, b, amount)
            } else {
                Debt::new(b, a, -amount)
            }
        })
        .collect();
    obligations.sort();
    obligations
}
