pub mod balance;
pub mod expense;
pub mod money;
pub mod participant;
pub mod settlement;
pub mod split;

pub use balance::{ContactBalance, ContactExpenseLine, Debt, MemberSummary, NetBalances};
pub use expense::{ShareRow, SharedExpenseFact};
pub use money::Money;
pub use participant::ParticipantId;
pub use settlement::SettlementFact;
pub use split::{ResolvedSplit, SplitInput, SplitMethod, SplitShare};
