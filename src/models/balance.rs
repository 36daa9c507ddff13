use super::{Money, ParticipantId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Signed position per member: positive is owed to them, negative they owe.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetBalances(BTreeMap<ParticipantId, Money>);

impl NetBalances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of a member, zero when the member never appeared.
    pub fn get(&self, participant: &ParticipantId) -> Money {
        self.0.get(participant).copied().unwrap_or(Money::ZERO)
    }

    pub fn contains(&self, participant: &ParticipantId) -> bool {
        self.0.contains_key(participant)
    }

    /// Registers a member at zero if they are not tracked yet.
    pub fn touch(&mut self, participant: &ParticipantId) {
        self.0.entry(participant.clone()).or_insert(Money::ZERO);
    }

    pub fn credit(&mut self, participant: &ParticipantId, amount: Money) {
        *self.0.entry(participant.clone()).or_insert(Money::ZERO) += amount;
    }

    pub fn debit(&mut self, participant: &ParticipantId, amount: Money) {
        *self.0.entry(participant.clone()).or_insert(Money::ZERO) -= amount;
    }

    /// Applies a transfer: the debtor pays and the creditor is paid.
    pub fn apply(&mut self, debt: &Debt) {
        self.credit(&debt.from, debt.amount);
        self.debit(&debt.to, debt.amount);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, Money)> {
        self.0.iter().map(|(participant, amount)| (participant, *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> Money {
        self.0.values().sum()
    }

    pub fn is_settled(&self) -> bool {
        self.0.values().all(|amount| amount.is_zero())
    }

    pub fn creditors(&self) -> impl Iterator<Item = (&ParticipantId, Money)> {
        self.iter().filter(|(_, amount)| amount.is_positive())
    }

    pub fn debtors(&self) -> impl Iterator<Item = (&ParticipantId, Money)> {
        self.iter().filter(|(_, amount)| amount.is_negative())
    }
}

impl FromIterator<(ParticipantId, Money)> for NetBalances {
    fn from_iter<T: IntoIterator<Item = (ParticipantId, Money)>>(iter: T) -> Self {
        let mut balances = NetBalances::new();
        for (participant, amount) in iter {
            balances.credit(&participant, amount);
        }
        balances
    }
}

/// `from` owes `to` a positive `amount`. Always derived, never stored.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Debt {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

impl Debt {
    pub fn new(from: ParticipantId, to: ParticipantId, amount: Money) -> Self {
        Self { from, to, amount }
    }
}

impl fmt::Display for Debt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} owes {} {}", self.from, self.to, self.amount)
    }
}

/// Where a member's net balance comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSummary {
    /// Totals of expenses this member paid.
    pub paid: Money,
    /// This member's own shares across all expenses.
    pub share: Money,
    /// Shares on expenses this member paid that were settled directly.
    pub repaid_to: Money,
    /// This member's shares on others' expenses that were settled directly.
    pub repaid_by: Money,
    pub sent: Money,
    pub received: Money,
    pub net: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactExpenseLine {
    pub expense_id: Uuid,
    pub description: String,
    pub total: Money,
    /// The counterpart's share of the expense.
    pub share: Money,
    pub settled: bool,
}

/// Balance between a user and one contact. Only pending shares count toward
/// `net_balance`; positive means the contact owes the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBalance {
    pub user: ParticipantId,
    pub contact: ParticipantId,
    pub user_paid: Vec<ContactExpenseLine>,
    pub contact_paid: Vec<ContactExpenseLine>,
    pub user_paid_total: Money,
    pub user_paid_settled: Money,
    pub user_paid_grand_total: Money,
    pub contact_paid_total: Money,
    pub contact_paid_settled: Money,
    pub contact_paid_grand_total: Money,
    pub net_balance: Money,
}

impl ContactBalance {
    pub fn new(user: ParticipantId, contact: ParticipantId) -> Self {
        ContactBalance {
            user,
            contact,
            user_paid: Vec::new(),
            contact_paid: Vec::new(),
            user_paid_total: Money::ZERO,
            user_paid_settled: Money::ZERO,
            user_paid_grand_total: Money::ZERO,
            contact_paid_total: Money::ZERO,
            contact_paid_settled: Money::ZERO,
            contact_paid_grand_total: Money::ZERO,
            net_balance: Money::ZERO,
        }
    }

    pub fn contact_owes_user(&self) -> bool {
        self.net_balance.is_positive()
    }

    pub fn is_settled_up(&self) -> bool {
        self.net_balance.is_zero()
    }
}
