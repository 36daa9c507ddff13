//! Pure settlement engine: splits, balances, debt simplification and
//! per-contact balances. Nothing here performs I/O or mutates its inputs.

pub mod balance_aggregator;
pub mod debt_simplifier;
pub mod pairwise;
pub mod split_calculator;

pub use balance_aggregator::{aggregate, pairwise_obligations, summarize};
pub use debt_simplifier::simplify;
pub use pairwise::pairwise_balance;
pub use split_calculator::{compute_split, equal_amounts};
