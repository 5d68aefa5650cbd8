//! Answers "what does everyone owe, and how should they settle up" for one
//! event's full expense history.
//!
//! Pure composition of split calculation, balance aggregation, and debt
//! simplification. Failure in any sub-step returns a single error naming
//! the offending expense; no partial report is ever produced.

use uuid::Uuid;

use crate::{
    Currency, EngineError, MoneyCents, ResultEngine,
    balance::{Balance, BalanceBook, aggregate},
    expense::Expense,
    settlement::{Transfer, simplify},
    user::UserId,
};

/// Full settlement answer for one event.
///
/// Amounts stay in minor units here; [`SettlementReport::into_view`]
/// converts to the major-unit display shape the HTTP layer serializes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementReport {
    pub event_id: Uuid,
    pub currency: Currency,
    /// Sum of all expense amounts.
    pub total: MoneyCents,
    /// Per-user balances in first-seen order.
    pub balances: Vec<(UserId, Balance)>,
    pub transfers: Vec<Transfer>,
}

impl SettlementReport {
    /// Converts to the wire shape: major currency units, two decimals.
    #[must_use]
    pub fn into_view(self) -> api_types::settlement::SettlementReportView {
        use api_types::settlement::{BalanceView, SettlementReportView, TransferView};

        SettlementReportView {
            event_id: self.event_id,
            currency: self.currency.code().to_string(),
            total_amount: self.total.to_major(),
            balances: self
                .balances
                .into_iter()
                .map(|(user, balance)| BalanceView {
                    user: user.into(),
                    paid: balance.paid.to_major(),
                    owed: balance.owed.to_major(),
                    net: balance.net().to_major(),
                })
                .collect(),
            transfers: self
                .transfers
                .into_iter()
                .map(|transfer| TransferView {
                    from: transfer.from.into(),
                    to: transfer.to.into(),
                    amount: transfer.amount.to_major(),
                })
                .collect(),
        }
    }
}

/// Computes the settlement report for one event's expense snapshot.
///
/// Deterministic: the same snapshot always yields an identical report.
pub fn settlement_report(event_id: Uuid, expenses: &[Expense]) -> ResultEngine<SettlementReport> {
    let mut total = MoneyCents::ZERO;
    for expense in expenses {
        total = total.checked_add(expense.amount).ok_or_else(|| {
            EngineError::InvalidAmount("event total overflows".to_string())
        })?;
    }

    let book = aggregate(expenses)?;
    let transfers = simplify(&book);

    let currency = expenses
        .first()
        .map_or(Currency::default(), |expense| expense.currency);

    Ok(SettlementReport {
        event_id,
        currency,
        total,
        balances: collect_balances(&book),
        transfers,
    })
}

fn collect_balances(book: &BalanceBook) -> Vec<(UserId, Balance)> {
    book.iter()
        .map(|(user, balance)| (user.clone(), *balance))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::expense::{Share, SplitStrategy};

    fn dinner(event_id: Uuid) -> Expense {
        Expense::new(
            event_id,
            "Dinner".to_string(),
            MoneyCents::new(9_000),
            Currency::Eur,
            UserId::from("ann"),
            SplitStrategy::Equal,
            vec![Share::new("ann", 0), Share::new("bob", 0), Share::new("cat", 0)],
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn report_composes_total_balances_and_transfers() {
        let event_id = Uuid::new_v4();
        let report = settlement_report(event_id, &[dinner(event_id)]).unwrap();

        assert_eq!(report.event_id, event_id);
        assert_eq!(report.total.cents(), 9_000);
        assert_eq!(report.balances.len(), 3);
        assert_eq!(report.transfers.len(), 2);
    }

    #[test]
    fn empty_snapshot_gives_empty_report() {
        let event_id = Uuid::new_v4();
        let report = settlement_report(event_id, &[]).unwrap();

        assert_eq!(report.total, MoneyCents::ZERO);
        assert!(report.balances.is_empty());
        assert!(report.transfers.is_empty());
    }

    #[test]
    fn failed_sub_step_names_the_expense() {
        let event_id = Uuid::new_v4();
        let mut bad = dinner(event_id);
        bad.strategy = SplitStrategy::Shares;
        for share in &mut bad.shares {
            share.value = 0;
        }
        let expense_id = bad.id;

        let err = settlement_report(event_id, &[dinner(event_id), bad]).unwrap_err();
        match err {
            EngineError::InvalidSplit { expense_id: id, .. } => assert_eq!(id, expense_id),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn view_amounts_are_major_units() {
        let event_id = Uuid::new_v4();
        let view = settlement_report(event_id, &[dinner(event_id)])
            .unwrap()
            .into_view();

        assert_eq!(view.total_amount, 90.0);
        assert_eq!(view.currency, "EUR");
        assert_eq!(view.balances[0].user, "ann");
        assert_eq!(view.balances[0].paid, 90.0);
        assert_eq!(view.balances[0].owed, 30.0);
        assert_eq!(view.balances[0].net, 60.0);
    }
}
