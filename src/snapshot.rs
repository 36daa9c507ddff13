//! JSON description of a group, replayed through [`GroupLedger`] so every
//! ledger validation applies.
//!
//! ```json
//! {
//!   "name": "Trip",
//!   "members": ["ana", "ben", "cat"],
//!   "expenses": [
//!     { "description": "Dinner", "payer": "ana", "total": "90.00", "method": "shares",
//!       "inputs": [{ "participant": "ana", "value": 2 }, { "participant": "ben", "value": 1 }] }
//!   ],
//!   "settlements": [{ "from": "ben", "to": "ana", "amount": "10.00" }]
//! }
//! ```

use crate::error::SnapshotError;
use crate::ledger::{GroupLedger, NewExpense};
use crate::models::{Money, ParticipantId, SplitInput, SplitMethod};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub name: String,
    #[serde(default)]
    pub currency: Option<String>,
    pub members: Vec<ParticipantId>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub settlements: Vec<SettlementRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub description: String,
    pub payer: ParticipantId,
    pub total: Money,
    /// Split method tag; defaults to `equal`.
    #[serde(default = "default_method")]
    pub method: String,
    /// Defaults to the input participants, or every member for `equal`.
    #[serde(default)]
    pub participants: Vec<ParticipantId>,
    #[serde(default)]
    pub inputs: Vec<SplitInput>,
    /// Participants whose share has already been paid back.
    #[serde(default)]
    pub settled: Vec<ParticipantId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
    #[serde(default)]
    pub note: Option<String>,
}

fn default_method() -> String {
    SplitMethod::Equal.to_string()
}

impl LedgerSnapshot {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        info!("Loading snapshot from {}", path.display());
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Builds the ledger, using `default_currency` when the snapshot has none.
    pub fn into_ledger(self, default_currency: &str) -> Result<GroupLedger, SnapshotError> {
        let currency = self
            .currency
            .unwrap_or_else(|| default_currency.to_string());
        let mut ledger = GroupLedger::new(self.name, self.members, currency);

        for (index, record) in self.expenses.into_iter().enumerate() {
            let method: SplitMethod = record
                .method
                .parse()
                .map_err(|source| SnapshotError::Method { index, source })?;
            let participants = if !record.participants.is_empty() {
                record.participants
            } else if method.needs_inputs() {
                record
                    .inputs
                    .iter()
                    .map(|input| input.participant.clone())
                    .collect()
            } else {
                ledger.members().to_vec()
            };

            let id = ledger
                .add_expense(NewExpense {
                    description: record.description,
                    payer: record.payer,
                    total: record.total,
                    method,
                    participants,
                    inputs: record.inputs,
                })?
                .id;
            for participant in &record.settled {
                ledger.set_share_settled(id, participant, true)?;
            }
        }

        for record in self.settlements {
            ledger.record_settlement(record.from, record.to, record.amount, record.note)?;
        }

        debug!(
            "Snapshot replayed into group {} with {} expenses",
            ledger.id(),
            ledger.expenses().count()
        );
        Ok(ledger)
    }
}
