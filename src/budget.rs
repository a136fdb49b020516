// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{Budget, Transaction, TransactionType, total};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub total_spent: Decimal,
    pub percentage: u8,
    pub remaining: Decimal,
    pub over_budget: bool,
}

/// Expenses in the budget's category whose date falls inside its window.
pub fn spent_against<'a>(
    budget: &'a Budget,
    transactions: &'a [Transaction],
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions.iter().filter(move |tx| {
        tx.category == budget.category
            && tx.kind == TransactionType::Expense
            && budget.covers(tx.date)
    })
}

pub fn compute_budget_progress(budget: &Budget, transactions: &[Transaction]) -> BudgetProgress {
    let total_spent = total(spent_against(budget, transactions).map(|tx| tx.amount));
    BudgetProgress {
        total_spent,
        percentage: percentage_of(total_spent, budget.amount),
        remaining: budget.amount.saturating_sub(total_spent).max(Decimal::ZERO),
        over_budget: total_spent > budget.amount,
    }
}

/// Whole percent of `target` consumed, clamped to 0..=100.
fn percentage_of(spent: Decimal, target: Decimal) -> u8 {
    if target <= Decimal::ZERO {
        return if spent > Decimal::ZERO { 100 } else { 0 };
    }
    let pct = spent
        .checked_div(target)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|p| p.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ONE_HUNDRED);
    pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .to_u8()
        .unwrap_or(100)
}
