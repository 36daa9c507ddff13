pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod models;
pub mod snapshot;

pub use crate::engine::{
    aggregate, compute_split, equal_amounts, pairwise_balance, pairwise_obligations, simplify,
    summarize,
};
pub use error::{LedgerError, MoneyError, SnapshotError, SplitError};
pub use ledger::{GroupLedger, NewExpense};
pub use models::*;
pub use snapshot::LedgerSnapshot;

#[cfg(test)]
mod tests;
