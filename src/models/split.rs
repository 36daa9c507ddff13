use super::{Money, ParticipantId};
use crate::error::SplitError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMethod {
    Equal,
    Exact,
    Percentage,
    Shares,
}

impl SplitMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SplitMethod::Equal => "equal",
            SplitMethod::Exact => "exact",
            SplitMethod::Percentage => "percentage",
            SplitMethod::Shares => "shares",
        }
    }

    /// Whether the method reads per-participant input values.
    pub fn needs_inputs(self) -> bool {
        !matches!(self, SplitMethod::Equal)
    }
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitMethod {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(SplitMethod::Equal),
            "exact" => Ok(SplitMethod::Exact),
            "percentage" => Ok(SplitMethod::Percentage),
            "shares" => Ok(SplitMethod::Shares),
            _ => Err(SplitError::InvalidMethod(s.to_string())),
        }
    }
}

/// A raw per-participant value. Ignored for `equal`; an amount for `exact`,
/// percentage points for `percentage` and a weight for `shares`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitInput {
    pub participant: ParticipantId,
    pub value: Decimal,
}

impl SplitInput {
    pub fn new(participant: impl Into<ParticipantId>, value: Decimal) -> Self {
        Self {
            participant: participant.into(),
            value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SplitShare {
    pub participant: ParticipantId,
    pub amount: Money,
    /// Display only. Percentage-method values are kept as given; other
    /// methods round to two decimal places.
    pub percentage: Decimal,
}

/// The frozen outcome of a split calculation. Amounts always add up to the
/// total exactly; only the calculator builds one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedSplit {
    method: SplitMethod,
    total: Money,
    shares: Vec<SplitShare>,
}

impl ResolvedSplit {
    pub(crate) fn new(method: SplitMethod, total: Money, shares: Vec<SplitShare>) -> Self {
        Self {
            method,
            total,
            shares,
        }
    }

    pub fn method(&self) -> SplitMethod {
        self.method
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn shares(&self) -> &[SplitShare] {
        &self.shares
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn amounts(&self) -> impl Iterator<Item = Money> + '_ {
        self.shares.iter().map(|share| share.amount)
    }

    pub fn amount_for(&self, participant: &ParticipantId) -> Option<Money> {
        self.shares
            .iter()
            .find(|share| &share.participant == participant)
            .map(|share| share.amount)
    }

    pub fn into_shares(self) -> Vec<SplitShare> {
        self.shares
    }
}
