use crate::models::{Money, ParticipantId};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MoneyError {
    /// Input could not be read as a decimal number
    #[error("Invalid amount: {0}")]
    Parse(String),

    /// Amount has sub-cent precision
    #[error("Amount {0} has more than two decimal places")]
    TooManyDecimals(String),

    /// Amount does not fit the cent range
    #[error("Amount {0} is out of range")]
    OutOfRange(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SplitError {
    /// No participants, or no inputs for a method that needs them
    #[error("A split needs at least one member")]
    NoMembers,

    /// Split method tag is not one of equal, exact, percentage or shares
    #[error("Invalid split method: {0}")]
    InvalidMethod(String),

    /// Exact amounts are more than one cent away from the total
    #[error("Split amounts add up to {actual}, expected {expected}")]
    AmountMismatch { expected: Money, actual: Money },

    /// Percentages are more than 0.01 away from 100
    #[error("Percentages add up to {actual}, expected 100")]
    PercentageMismatch { actual: Decimal },

    /// Every share weight is zero
    #[error("Total shares must be greater than zero")]
    ZeroShares,

    /// At least one share weight is negative
    #[error("Shares cannot be negative")]
    NegativeShares,

    /// Input names someone outside the participant list
    #[error("{0} is not a participant of this split")]
    UnknownParticipant(ParticipantId),

    /// Input names the same participant twice
    #[error("{0} appears more than once in this split")]
    DuplicateParticipant(ParticipantId),

    /// Exact input is not a valid money amount
    #[error(transparent)]
    InvalidAmount(#[from] MoneyError),

    /// Intermediate arithmetic left the representable range
    #[error("Split amount is out of range")]
    AmountOutOfRange,
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LedgerError {
    #[error(transparent)]
    Split(#[from] SplitError),

    #[error("{0} is not a group member")]
    NotGroupMember(ParticipantId),

    #[error("{0} is already a group member")]
    AlreadyGroupMember(ParticipantId),

    #[error("Expense {0} not found")]
    ExpenseNotFound(Uuid),

    #[error("Expense {0} already deleted")]
    ExpenseAlreadyDeleted(Uuid),

    #[error("{participant} has no share in expense {expense_id}")]
    ShareNotFound {
        expense_id: Uuid,
        participant: ParticipantId,
    },

    /// Settlements and contact views need two different members
    #[error("{0} cannot settle with themselves")]
    SelfSettlement(ParticipantId),

    /// Amount must be positive and at most 1,000,000.00
    #[error("Invalid amount {0}")]
    InvalidAmount(Money),
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expense {index}: {source}")]
    Method { index: usize, source: SplitError },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
