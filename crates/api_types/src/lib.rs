//! Wire-shaped views shared between the engine and the HTTP layer.
//!
//! Amounts here are **major currency units** for display (e.g. `90.0` for
//! 90.00 EUR); the engine computes in integer minor units and converts at
//! this boundary only.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod settlement {
    use super::*;

    /// Per-user paid/owed/net summary, major units.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct BalanceView {
        pub user: String,
        pub paid: f64,
        pub owed: f64,
        /// `paid - owed`; positive means the event owes this user money.
        pub net: f64,
    }

    /// One settlement instruction: `from` pays `to` the given amount.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct TransferView {
        pub from: String,
        pub to: String,
        pub amount: f64,
    }

    /// Response body for "settle up this event".
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct SettlementReportView {
        pub event_id: Uuid,
        /// Canonical currency code (e.g. `"EUR"`).
        pub currency: String,
        /// Sum of all expense amounts, major units.
        pub total_amount: f64,
        /// Per-user balances, in first-seen order over the expense list.
        pub balances: Vec<BalanceView>,
        pub transfers: Vec<TransferView>,
    }
}
