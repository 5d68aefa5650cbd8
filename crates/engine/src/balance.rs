//! Folds many expenses into one net balance per participant.
//!
//! Balances are derived values: recomputed on demand from the expense
//! snapshot, never persisted, discarded after the report.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    MoneyCents, ResultEngine,
    currency::ensure_event_currency,
    expense::Expense,
    split::calculate_shares,
    user::UserId,
};

/// Per-user paid/owed totals for one event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Sum of expense amounts where this user is the payer.
    pub paid: MoneyCents,
    /// Sum of this user's calculated shares across all expenses.
    pub owed: MoneyCents,
}

impl Balance {
    /// `paid - owed`: positive means the event owes this user money.
    #[must_use]
    pub fn net(&self) -> MoneyCents {
        self.paid - self.owed
    }
}

/// Insertion-ordered balance mapping.
///
/// Keyed by user identity; iteration preserves first-seen order so report
/// output stays stable for display, as a plain `HashMap` would not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceBook {
    order: Vec<UserId>,
    balances: HashMap<UserId, Balance>,
}

impl BalanceBook {
    fn entry(&mut self, user: &UserId) -> &mut Balance {
        if !self.balances.contains_key(user) {
            self.order.push(user.clone());
        }
        self.balances.entry(user.clone()).or_default()
    }

    #[must_use]
    pub fn get(&self, user: &UserId) -> Option<&Balance> {
        self.balances.get(user)
    }

    /// Iterates in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&UserId, &Balance)> {
        self.order
            .iter()
            .filter_map(|user| self.balances.get(user).map(|balance| (user, balance)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all nets; zero (within tolerance) for a consistent ledger.
    #[must_use]
    pub fn net_total(&self) -> MoneyCents {
        self.balances.values().map(Balance::net).sum()
    }
}

/// Aggregates expenses into per-user balances.
///
/// The payer's `paid` is credited the full expense amount exactly once per
/// expense, even when the payer also appears among the shares; every
/// calculated share debits its holder's `owed`. Users appearing on only one
/// side still get an entry.
pub fn aggregate(expenses: &[Expense]) -> ResultEngine<BalanceBook> {
    let mut book = BalanceBook::default();
    let Some(first) = expenses.first() else {
        return Ok(book);
    };
    let event_currency = first.currency;

    for expense in expenses {
        ensure_event_currency(event_currency, expense.currency)?;
        let calculated = calculate_shares(expense)?;

        book.entry(&expense.payer).paid += expense.amount;
        for share in calculated {
            book.entry(&share.user).owed += share.amount;
        }
    }

    // Reconciled splits make every expense zero-sum, so any residual here
    // indicates a bug elsewhere; surface it to operators, non-fatally.
    let residual = book.net_total();
    if residual.cents().unsigned_abs() > expenses.len() as u64 {
        tracing::warn!(
            event_id = %first.event_id,
            residual_cents = residual.cents(),
            expense_count = expenses.len(),
            "aggregation_inconsistency: balances violate the zero-sum invariant"
        );
    }

    Ok(book)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::{
        Currency,
        expense::{Share, SplitStrategy},
    };

    fn equal_expense(event_id: Uuid, amount: i64, payer: &str, holders: &[&str]) -> Expense {
        Expense::new(
            event_id,
            "Test".to_string(),
            MoneyCents::new(amount),
            Currency::Eur,
            UserId::from(payer),
            SplitStrategy::Equal,
            holders.iter().map(|user| Share::new(*user, 0)).collect(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn empty_expense_list_gives_empty_book() {
        let book = aggregate(&[]).unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn payer_credited_once_and_shares_debited() {
        let event_id = Uuid::new_v4();
        let book = aggregate(&[equal_expense(event_id, 3000, "ann", &["ann", "bob", "cat"])])
            .unwrap();

        let ann = book.get(&UserId::from("ann")).unwrap();
        assert_eq!(ann.paid.cents(), 3000);
        assert_eq!(ann.owed.cents(), 1000);
        assert_eq!(ann.net().cents(), 2000);

        let bob = book.get(&UserId::from("bob")).unwrap();
        assert_eq!(bob.paid, MoneyCents::ZERO);
        assert_eq!(bob.owed.cents(), 1000);
    }

    #[test]
    fn payer_is_sole_share_holder_nets_zero() {
        let event_id = Uuid::new_v4();
        let book = aggregate(&[equal_expense(event_id, 4200, "ann", &["ann"])]).unwrap();

        let ann = book.get(&UserId::from("ann")).unwrap();
        assert_eq!(ann.paid.cents(), 4200);
        assert_eq!(ann.owed.cents(), 4200);
        assert_eq!(ann.net(), MoneyCents::ZERO);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn nets_sum_to_zero_across_expenses() {
        let event_id = Uuid::new_v4();
        let book = aggregate(&[
            equal_expense(event_id, 10_000, "ann", &["ann", "bob", "cat"]),
            equal_expense(event_id, 777, "bob", &["ann", "cat"]),
            equal_expense(event_id, 9_999, "cat", &["bob"]),
        ])
        .unwrap();

        assert_eq!(book.net_total(), MoneyCents::ZERO);
    }

    #[test]
    fn iteration_preserves_first_seen_order() {
        let event_id = Uuid::new_v4();
        let book = aggregate(&[
            equal_expense(event_id, 300, "cat", &["bob", "ann"]),
            equal_expense(event_id, 300, "ann", &["cat"]),
        ])
        .unwrap();

        let order: Vec<&str> = book.iter().map(|(user, _)| user.as_str()).collect();
        assert_eq!(order, vec!["cat", "bob", "ann"]);
    }

    #[test]
    #[should_panic(expected = "InvalidSplit")]
    fn fail_propagates_split_error() {
        let event_id = Uuid::new_v4();
        let mut expense = equal_expense(event_id, 300, "ann", &["bob"]);
        expense.shares.clear();
        aggregate(&[expense]).unwrap();
    }
}
