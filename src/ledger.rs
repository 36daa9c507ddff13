use crate::constants::MAX_AMOUNT_CENTS;
use crate::engine::{aggregate, compute_split, pairwise_balance, pairwise_obligations, simplify, summarize};
use crate::error::LedgerError;
use crate::models::*;
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Everything needed to create or edit an expense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub description: String,
    pub payer: ParticipantId,
    pub total: Money,
    pub method: SplitMethod,
    pub participants: Vec<ParticipantId>,
    #[serde(default)]
    pub inputs: Vec<SplitInput>,
}

impl NewExpense {
    pub fn equal(
        description: impl Into<String>,
        payer: impl Into<ParticipantId>,
        total: Money,
        participants: Vec<ParticipantId>,
    ) -> Self {
        NewExpense {
            description: description.into(),
            payer: payer.into(),
            total,
            method: SplitMethod::Equal,
            participants,
            inputs: Vec::new(),
        }
    }

    /// Participants are taken from `inputs`, in order.
    pub fn with_inputs(
        description: impl Into<String>,
        payer: impl Into<ParticipantId>,
        total: Money,
        method: SplitMethod,
        inputs: Vec<SplitInput>,
    ) -> Self {
        NewExpense {
            description: description.into(),
            payer: payer.into(),
            total,
            method,
            participants: inputs.iter().map(|input| input.participant.clone()).collect(),
            inputs,
        }
    }
}

/// In-memory snapshot of one group's members, expenses and settlements.
///
/// Splits are computed and frozen when an expense is added or edited; every
/// balance view is derived from the current facts on each call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupLedger {
    id: Uuid,
    name: String,
    currency: String,
    members: Vec<ParticipantId>,
    expenses: Vec<SharedExpenseFact>,
    settlements: Vec<SettlementFact>,
}

impl GroupLedger {
    pub fn new(
        name: impl Into<String>,
        members: Vec<ParticipantId>,
        currency: impl Into<String>,
    ) -> Self {
        let mut ledger = GroupLedger {
            id: Uuid::new_v4(),
            name: name.into(),
            currency: currency.into(),
            members: Vec::with_capacity(members.len()),
            expenses: Vec::new(),
            settlements: Vec::new(),
        };
        for member in members {
            if !ledger.is_member(&member) {
                ledger.members.push(member);
            }
        }
        info!(
            "Created group '{}' ({}) with {} members",
            ledger.name,
            ledger.id,
            ledger.members.len()
        );
        ledger
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn members(&self) -> &[ParticipantId] {
        &self.members
    }

    pub fn settlements(&self) -> &[SettlementFact] {
        &self.settlements
    }

    /// Expenses that have not been deleted.
    pub fn expenses(&self) -> impl Iterator<Item = &SharedExpenseFact> {
        self.expenses.iter().filter(|expense| !expense.is_deleted())
    }

    pub fn expense(&self, id: Uuid) -> Option<&SharedExpenseFact> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn is_member(&self, participant: &ParticipantId) -> bool {
        self.members.contains(participant)
    }

    // MEMBERSHIP

    pub fn add_member(&mut self, participant: ParticipantId) -> Result<(), LedgerError> {
        if self.is_member(&participant) {
            warn!("{} already in group {}", participant, self.id);
            return Err(LedgerError::AlreadyGroupMember(participant));
        }
        info!("Adding {} to group {}", participant, self.id);
        self.members.push(participant);
        Ok(())
    }

    // EXPENSES

    pub fn add_expense(&mut self, expense: NewExpense) -> Result<&SharedExpenseFact, LedgerError> {
        info!(
            "Creating expense '{}' in group {} paid by {} for {}",
            expense.description, self.id, expense.payer, expense.total
        );
        let fact = self.freeze(expense)?;
        debug!("Expense created with ID: {}", fact.id);

        self.expenses.push(fact);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// Recomputes the split of an existing expense. Settled flags start over.
    pub fn update_expense(
        &mut self,
        id: Uuid,
        expense: NewExpense,
    ) -> Result<&SharedExpenseFact, LedgerError> {
        info!("Updating expense {} in group {}", id, self.id);
        let index = self.live_expense_index(id)?;
        let fact = self.freeze(expense)?;

        let existing = &self.expenses[index];
        let updated = SharedExpenseFact {
            id: existing.id,
            created_at: existing.created_at,
            ..fact
        };
        debug!("Expense updated: {:?}", updated);

        self.expenses[index] = updated;
        Ok(&self.expenses[index])
    }

    /// Soft delete; the expense stays addressable but leaves every balance.
    pub fn delete_expense(&mut self, id: Uuid) -> Result<(), LedgerError> {
        info!("Soft deleting expense {} in group {}", id, self.id);
        let index = self.live_expense_index(id)?;

        let now = Utc::now();
        let expense = &mut self.expenses[index];
        expense.deleted_at = Some(now);
        expense.updated_at = now;
        Ok(())
    }

    /// Marks one share row paid back (or pending again).
    pub fn set_share_settled(
        &mut self,
        id: Uuid,
        participant: &ParticipantId,
        settled: bool,
    ) -> Result<(), LedgerError> {
        info!(
            "Marking share of {} in expense {} as {}",
            participant,
            id,
            if settled { "settled" } else { "pending" }
        );
        let index = self.live_expense_index(id)?;
        let expense = &mut self.expenses[index];
        let row = expense.share_of_mut(participant).ok_or_else(|| {
            warn!("{} has no share in expense {}", participant, id);
            LedgerError::ShareNotFound {
                expense_id: id,
                participant: participant.clone(),
            }
        })?;
        row.settled = settled;
        expense.updated_at = Utc::now();
        Ok(())
    }

    // SETTLEMENTS

    pub fn record_settlement(
        &mut self,
        from: ParticipantId,
        to: ParticipantId,
        amount: Money,
        note: Option<String>,
    ) -> Result<&SettlementFact, LedgerError> {
        info!(
            "Recording settlement of {} from {} to {} in group {}",
            amount, from, to, self.id
        );
        self.ensure_member(&from)?;
        self.ensure_member(&to)?;
        if from == to {
            warn!("{} attempted to settle with themselves", from);
            return Err(LedgerError::SelfSettlement(from));
        }
        Self::ensure_valid_amount(amount)?;

        self.settlements
            .push(SettlementFact::new(from, to, amount, note));
        Ok(&self.settlements[self.settlements.len() - 1])
    }

    // SUMMARY & DEBT SIMPLIFICATION

    fn live_facts(&self) -> Vec<SharedExpenseFact> {
        self.expenses().cloned().collect()
    }

    pub fn balances(&self) -> NetBalances {
        debug!("Calculating balances for group {}", self.id);
        let mut balances = aggregate(&self.live_facts(), &self.settlements);
        for member in &self.members {
            balances.touch(member);
        }
        balances
    }

    pub fn debts(&self) -> Vec<Debt> {
        simplify(&self.balances())
    }

    pub fn obligations(&self) -> Vec<Debt> {
        pairwise_obligations(&self.live_facts(), &self.settlements)
    }

    pub fn summaries(&self) -> BTreeMap<ParticipantId, MemberSummary> {
        let mut summaries = summarize(&self.live_facts(), &self.settlements);
        for member in &self.members {
            summaries.entry(member.clone()).or_default();
        }
        summaries
    }

    pub fn contact_balance(
        &self,
        user: &ParticipantId,
        contact: &ParticipantId,
    ) -> Result<ContactBalance, LedgerError> {
        self.ensure_member(user)?;
        self.ensure_member(contact)?;
        if user == contact {
            return Err(LedgerError::SelfSettlement(user.clone()));
        }

        let shared: Vec<SharedExpenseFact> = self
            .expenses()
            .filter(|expense| expense.involves(user) && expense.involves(contact))
            .cloned()
            .collect();
        Ok(pairwise_balance(user, contact, &shared))
    }

    // VALIDATION

    fn freeze(&self, expense: NewExpense) -> Result<SharedExpenseFact, LedgerError> {
        self.ensure_member(&expense.payer)?;
        for participant in &expense.participants {
            self.ensure_member(participant)?;
        }
        Self::ensure_valid_amount(expense.total)?;

        let split = compute_split(
            expense.method,
            expense.total,
            &expense.participants,
            &expense.inputs,
        )?;
        Ok(SharedExpenseFact::new(expense.description, expense.payer, split))
    }

    fn live_expense_index(&self, id: Uuid) -> Result<usize, LedgerError> {
        let index = self
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or_else(|| {
                warn!("Expense {} not found in group {}", id, self.id);
                LedgerError::ExpenseNotFound(id)
            })?;
        if self.expenses[index].is_deleted() {
            warn!("Expense {} already deleted", id);
            return Err(LedgerError::ExpenseAlreadyDeleted(id));
        }
        Ok(index)
    }

    fn ensure_member(&self, participant: &ParticipantId) -> Result<(), LedgerError> {
        if self.is_member(participant) {
            Ok(())
        } else {
            warn!("{} not in group {}", participant, self.id);
            Err(LedgerError::NotGroupMember(participant.clone()))
        }
    }

    fn ensure_valid_amount(amount: Money) -> Result<(), LedgerError> {
        if !amount.is_positive() || amount.cents() > MAX_AMOUNT_CENTS {
            warn!("Rejecting amount {}", amount);
            return Err(LedgerError::InvalidAmount(amount));
        }
        Ok(())
    }
}
