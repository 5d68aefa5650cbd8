//! Converts one expense and its raw split inputs into per-participant
//! obligations.
//!
//! All arithmetic is integer minor units. Division results are rounded
//! half-up and a final reconciliation step assigns leftover cents to shares
//! in declaration order, so the calculated amounts always sum **exactly** to
//! the expense amount.

use crate::{
    EngineError, MoneyCents, ResultEngine,
    expense::{Expense, Share, SplitStrategy},
    user::UserId,
};

/// A share with its calculated monetary obligation, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalculatedShare {
    pub user: UserId,
    pub amount: MoneyCents,
    /// Carried through from [`Share::settled`]; tracking only, never part
    /// of the arithmetic.
    pub settled: bool,
}

/// Computes each participant's owed amount for one expense.
///
/// Pure transformation; the only side effect is a `tracing` warning when
/// the pre-reconciliation rounding drift exceeds one cent per share (a
/// guard for future strategy additions, not an expected path).
pub fn calculate_shares(expense: &Expense) -> ResultEngine<Vec<CalculatedShare>> {
    let shares = &expense.shares;
    if shares.is_empty() {
        return Err(EngineError::invalid_split(
            expense.id,
            "expense has no shares",
        ));
    }

    let mut amounts = match expense.strategy {
        SplitStrategy::Equal => equal_amounts(expense.amount, shares.len()),
        SplitStrategy::Percentage => percentage_amounts(expense, shares)?,
        SplitStrategy::Amount => absolute_amounts(expense, shares)?,
        SplitStrategy::Shares => weighted_amounts(expense, shares)?,
    };

    reconcile(expense, &mut amounts);
    debug_assert_eq!(amounts.iter().copied().sum::<MoneyCents>(), expense.amount);

    Ok(shares
        .iter()
        .zip(amounts)
        .map(|(share, amount)| CalculatedShare {
            user: share.user.clone(),
            amount,
            settled: share.settled,
        })
        .collect())
}

/// Floor division; the remainder goes one cent each to the first shares.
fn equal_amounts(amount: MoneyCents, count: usize) -> Vec<MoneyCents> {
    let count_i64 = count as i64;
    let base = amount.cents() / count_i64;
    let remainder = amount.cents() - base * count_i64;
    (0..count_i64)
        .map(|i| MoneyCents::new(if i < remainder { base + 1 } else { base }))
        .collect()
}

/// Basis points per share (10 000 = 100%); the declared points must total
/// exactly 100%.
fn percentage_amounts(expense: &Expense, shares: &[Share]) -> ResultEngine<Vec<MoneyCents>> {
    let total = checked_value_sum(expense, shares, "percentage")?;
    if total != 10_000 {
        return Err(EngineError::invalid_split(
            expense.id,
            format!("share percentages total {total} basis points, expected 10000"),
        ));
    }
    shares
        .iter()
        .map(|share| {
            expense
                .amount
                .mul_ratio_round_half_up(share.value, 10_000)
        })
        .collect()
}

/// Values are taken directly as cents and must already total the amount.
fn absolute_amounts(expense: &Expense, shares: &[Share]) -> ResultEngine<Vec<MoneyCents>> {
    let total = checked_value_sum(expense, shares, "amount")?;
    if total != expense.amount.cents() {
        return Err(EngineError::invalid_split(
            expense.id,
            format!(
                "share amounts total {}, expected {}",
                MoneyCents::new(total),
                expense.amount
            ),
        ));
    }
    Ok(shares
        .iter()
        .map(|share| MoneyCents::new(share.value))
        .collect())
}

/// Relative weights; each share owes `amount * weight / total_weight`.
fn weighted_amounts(expense: &Expense, shares: &[Share]) -> ResultEngine<Vec<MoneyCents>> {
    let total = checked_value_sum(expense, shares, "weight")?;
    if total == 0 {
        return Err(EngineError::invalid_split(
            expense.id,
            "share weights sum to zero",
        ));
    }
    shares
        .iter()
        .map(|share| expense.amount.mul_ratio_round_half_up(share.value, total))
        .collect()
}

fn checked_value_sum(expense: &Expense, shares: &[Share], label: &str) -> ResultEngine<i64> {
    let mut total: i64 = 0;
    for share in shares {
        if share.value < 0 {
            return Err(EngineError::invalid_split(
                expense.id,
                format!("negative {label} value for user {}", share.user),
            ));
        }
        total = total.checked_add(share.value).ok_or_else(|| {
            EngineError::invalid_split(expense.id, format!("{label} values overflow"))
        })?;
    }
    Ok(total)
}

/// Distributes the rounding leftover, one signed cent at a time, to shares
/// in declaration order (cycling) until the amounts sum exactly to the
/// expense total.
fn reconcile(expense: &Expense, amounts: &mut [MoneyCents]) {
    let sum: MoneyCents = amounts.iter().copied().sum();
    let mut leftover = expense.amount.cents() - sum.cents();
    if leftover == 0 {
        return;
    }

    // Half-up rounding leaves at most one cent per share; anything larger
    // means a strategy produced inconsistent raw amounts.
    if leftover.unsigned_abs() > amounts.len() as u64 {
        tracing::warn!(
            expense_id = %expense.id,
            strategy = ?expense.strategy,
            leftover_cents = leftover,
            share_count = amounts.len(),
            "rounding_inconsistency: leftover exceeds one cent per share"
        );
    }

    let step = leftover.signum();
    let mut idx = 0;
    while leftover != 0 {
        amounts[idx] += MoneyCents::new(step);
        leftover -= step;
        idx = (idx + 1) % amounts.len();
    }
}
