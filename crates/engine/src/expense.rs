//! The module contains the `Expense` and `Share` types.
//!
//! An event owns many expenses; an expense owns its shares. The engine only
//! ever receives read-only snapshots of these records from the persistence
//! layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, EngineError, MoneyCents, ResultEngine, user::UserId};

/// Rule used to convert an expense total into per-participant obligations.
///
/// The meaning of [`Share::value`] depends on this strategy; see [`Share`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Every share owes `amount / share count`; `value` is ignored.
    Equal,
    /// `value` is in basis points (10 000 = 100%); the declared points must
    /// sum to exactly 10 000.
    Percentage,
    /// `value` is an absolute amount in minor units; the values must sum to
    /// the expense amount.
    Amount,
    /// `value` is a unitless relative weight; the weight sum must be > 0.
    Shares,
}

/// One participant's stake in an expense.
///
/// `value` is a fixed-point integer whose unit depends on the expense's
/// [`SplitStrategy`] (basis points, minor units, or a weight). `settled` is
/// an orthogonal tracking flag: a settled share still contributes its full
/// calculated amount to the holder's `owed`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub user: UserId,
    pub value: i64,
    pub settled: bool,
}

impl Share {
    #[must_use]
    pub fn new(user: impl Into<UserId>, value: i64) -> Self {
        Self {
            user: user.into(),
            value,
            settled: false,
        }
    }
}

/// A single payment within a shared event, owed by a set of participants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub event_id: Uuid,
    pub description: String,
    pub amount: MoneyCents,
    pub currency: Currency,
    pub payer: UserId,
    pub strategy: SplitStrategy,
    pub shares: Vec<Share>,
    pub occurred_at: DateTime<Utc>,
}

impl Expense {
    /// Creates a validated expense.
    ///
    /// The amount must be strictly positive; share-level validation happens
    /// in the split calculator because it depends on the strategy.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        event_id: Uuid,
        description: String,
        amount: MoneyCents,
        currency: Currency,
        payer: UserId,
        strategy: SplitStrategy,
        shares: Vec<Share>,
        occurred_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(format!(
                "expense amount must be > 0, got {amount}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            event_id,
            description,
            amount,
            currency,
            payer,
            strategy,
            shares,
            occurred_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(amount: i64) -> ResultEngine<Expense> {
        Expense::new(
            Uuid::new_v4(),
            "Dinner".to_string(),
            MoneyCents::new(amount),
            Currency::Eur,
            UserId::from("ann"),
            SplitStrategy::Equal,
            vec![Share::new("ann", 0), Share::new("bob", 0)],
            Utc::now(),
        )
    }

    #[test]
    fn new_expense() {
        let expense = expense(4200).unwrap();
        assert_eq!(expense.amount.cents(), 4200);
        assert_eq!(expense.shares.len(), 2);
        assert!(!expense.shares[0].settled);
    }

    #[test]
    #[should_panic(expected = "InvalidAmount")]
    fn fail_zero_amount() {
        expense(0).unwrap();
    }

    #[test]
    #[should_panic(expected = "InvalidAmount")]
    fn fail_negative_amount() {
        expense(-100).unwrap();
    }
}
