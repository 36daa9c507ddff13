use super::{Money, ParticipantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A direct payment from one member to another. Settled by construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementFact {
    pub id: Uuid,
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SettlementFact {
    pub fn new(from: ParticipantId, to: ParticipantId, amount: Money, note: Option<String>) -> Self {
        SettlementFact {
            id: Uuid::new_v4(),
            from,
            to,
            amount,
            note,
            created_at: Utc::now(),
        }
    }
}
