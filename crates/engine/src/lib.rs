//! Shared expense ledger and settlement engine.
//!
//! The engine turns one event's expense snapshot into a settlement report:
//! per-expense obligations ([`split`]), net balances per participant
//! ([`balance`]), and a minimal deterministic list of settling transfers
//! ([`settlement`]), composed by [`report::settlement_report`].
//!
//! Everything here is a pure function over its inputs: no I/O, no shared
//! state, no locking. The persistence and HTTP layers live elsewhere; their
//! contract with this crate is "supply a consistent expense snapshot,
//! consume a report". Monetary values are integer minor units throughout
//! ([`MoneyCents`]); major-unit display conversion happens only in
//! [`report::SettlementReport::into_view`].

pub use balance::{Balance, BalanceBook, aggregate};
pub use currency::Currency;
pub use error::EngineError;
pub use expense::{Expense, Share, SplitStrategy};
pub use money::MoneyCents;
pub use report::{SettlementReport, settlement_report};
pub use settlement::{Transfer, simplify};
pub use split::{CalculatedShare, calculate_shares};
pub use user::UserId;

pub mod balance;
mod currency;
mod error;
pub mod expense;
mod money;
pub mod report;
pub mod settlement;
pub mod split;
mod user;

pub type ResultEngine<T> = Result<T, EngineError>;
