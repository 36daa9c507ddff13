use crate::models::{Debt, Money, NetBalances, ParticipantId};
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One side of the matching with what it still has to send or receive.
#[derive(Debug, PartialEq, Eq)]
struct Party {
    remaining: Money,
    participant: ParticipantId,
}

impl Ord for Party {
    // Largest amount first, then the smaller id.
    fn cmp(&self, other: &Self) -> Ordering {
        self.remaining
            .cmp(&other.remaining)
            .then_with(|| other.participant.cmp(&self.participant))
    }
}

impl PartialOrd for Party {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Turns net balances into settling transfers.
///
/// Greedy: the largest remaining creditor is repeatedly paid by the largest
/// remaining debtor, `min(credit, debit)` at a time. Equal amounts go to the
/// lexicographically smaller id first. Each step closes out at least one
/// party, so `n` non-zero balances yield at most `n - 1` debts. This is not a
/// guaranteed minimum.
pub fn simplify(balances: &NetBalances) -> Vec<Debt> {
    let mut creditors: BinaryHeap<Party> = balances
        .creditors()
        .map(|(participant, amount)| Party {
            remaining: amount,
            participant: participant.clone(),
        })
        .collect();
    let mut debtors: BinaryHeap<Party> = balances
        .debtors()
        .map(|(participant, amount)| Party {
            remaining: -amount,
            participant: participant.clone(),
        })
        .collect();

    let mut debts = Vec::with_capacity(creditors.len().max(debtors.len()));
    while !creditors.is_empty() && !debtors.is_empty() {
        let (Some(mut creditor), Some(mut debtor)) = (creditors.pop(), debtors.pop()) else {
            break;
        };

        let amount = creditor.remaining.min(debtor.remaining);
        creditor.remaining -= amount;
        debtor.remaining -= amount;
        debts.push(Debt::new(
            debtor.participant.clone(),
            creditor.participant.clone(),
            amount,
        ));

        if creditor.remaining.is_positive() {
            creditors.push(creditor);
        }
        if debtor.remaining.is_positive() {
            debtors.push(debtor);
        }
    }

    if !creditors.is_empty() || !debtors.is_empty() {
        let unmatched: Money = creditors
            .iter()
            .map(|party| party.remaining)
            .chain(debtors.iter().map(|party| -party.remaining))
            .sum();
        warn!("Balances do not net to zero; {} left unsettled", unmatched);
    }

    debug!("Simplified {} balances into {} debts", balances.len(), debts.len());
    debts
}
