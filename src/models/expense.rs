use super::{Money, ParticipantId, ResolvedSplit, SplitMethod};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stored split row. `settled` is toggled outside the core when the
/// participant pays the payer back directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRow {
    pub participant: ParticipantId,
    pub amount: Money,
    pub percentage: Decimal,
    #[serde(default)]
    pub settled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedExpenseFact {
    pub id: Uuid,
    pub description: String,
    pub payer: ParticipantId,
    pub total: Money,
    pub method: SplitMethod,
    pub shares: Vec<ShareRow>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SharedExpenseFact {
    /// Freezes a resolved split into an expense fact with every row pending.
    pub fn new(description: impl Into<String>, payer: ParticipantId, split: ResolvedSplit) -> Self {
        let now = Utc::now();
        let method = split.method();
        let total = split.total();
        let shares = split
            .into_shares()
            .into_iter()
            .map(|share| ShareRow {
                participant: share.participant,
                amount: share.amount,
                percentage: share.percentage,
                settled: false,
            })
            .collect();

        SharedExpenseFact {
            id: Uuid::new_v4(),
            description: description.into(),
            payer,
            total,
            method,
            shares,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn share_of(&self, participant: &ParticipantId) -> Option<&ShareRow> {
        self.shares.iter().find(|row| &row.participant == participant)
    }

    pub(crate) fn share_of_mut(&mut self, participant: &ParticipantId) -> Option<&mut ShareRow> {
        self.shares
            .iter_mut()
            .find(|row| &row.participant == participant)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// True when the participant paid or holds a share.
    pub fn involves(&self, participant: &ParticipantId) -> bool {
        &self.payer == participant || self.share_of(participant).is_some()
    }

    /// Sum of rows not yet marked settled.
    pub fn pending_total(&self) -> Money {
        self.shares
            .iter()
            .filter(|row| !row.settled)
            .map(|row| row.amount)
            .sum()
    }
}
