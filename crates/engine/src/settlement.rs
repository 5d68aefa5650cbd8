//! Reduces net balances to a minimal list of point-to-point payments.
//!
//! Greedy matching: the most-indebted participant pays the largest creditor
//! first. The transfer count is bounded by `debtors + creditors - 1`; ties
//! between equal-magnitude balances break on `UserId` order, so the output
//! is fully deterministic for a given balance book.

use serde::{Deserialize, Serialize};

use crate::{MoneyCents, balance::BalanceBook, user::UserId};

/// One settlement instruction: `from` pays `to` the given amount.
///
/// A transfer list is only meaningful as a whole: replaying every transfer
/// against the originating balances brings each net to zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: UserId,
    pub to: UserId,
    pub amount: MoneyCents,
}

/// Produces the transfers that settle all balances to zero.
///
/// Users with a zero net are omitted. Zero debtors or zero creditors yields
/// an empty list (already settled, or an aggregation inconsistency that the
/// aggregator has warned about).
#[must_use]
pub fn simplify(book: &BalanceBook) -> Vec<Transfer> {
    let mut debtors: Vec<(UserId, MoneyCents)> = Vec::new();
    let mut creditors: Vec<(UserId, MoneyCents)> = Vec::new();
    for (user, balance) in book.iter() {
        let net = balance.net();
        if net.is_negative() {
            debtors.push((user.clone(), net));
        } else if net.is_positive() {
            creditors.push((user.clone(), net));
        }
    }

    // Most negative debtor first, largest creditor first; UserId breaks ties.
    debtors.sort_by(|(user_a, net_a), (user_b, net_b)| {
        net_a.cmp(net_b).then_with(|| user_a.cmp(user_b))
    });
    creditors.sort_by(|(user_a, net_a), (user_b, net_b)| {
        net_b.cmp(net_a).then_with(|| user_a.cmp(user_b))
    });

    let mut transfers = Vec::new();
    let mut creditor_idx = 0;
    for (debtor, net) in debtors {
        let mut remaining = net.abs();
        while remaining.is_positive() && creditor_idx < creditors.len() {
            let (creditor, available) = &mut creditors[creditor_idx];
            let amount = remaining.min(*available);
            if amount.is_positive() {
                transfers.push(Transfer {
                    from: debtor.clone(),
                    to: creditor.clone(),
                    amount,
                });
                remaining -= amount;
                *available -= amount;
            }
            if available.is_zero() {
                creditor_idx += 1;
            }
        }
    }

    transfers
}
