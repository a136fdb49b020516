// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Income/expense totals and per-category spend over a transaction slice.

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::categories;
use crate::models::{Transaction, TransactionType, total};

/// Category id to summed amount, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals(Vec<(String, Decimal)>);

impl CategoryTotals {
    pub fn add(&mut self, category: &str, amount: Decimal) {
        match self.0.iter_mut().find(|(c, _)| c == category) {
            Some((_, sum)) => *sum = sum.saturating_add(amount),
            None => self.0.push((category.to_string(), amount)),
        }
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.0.iter().find(|(c, _)| c == category).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(c, v)| (c.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum(&self) -> Decimal {
        total(self.0.iter().map(|(_, v)| *v))
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(self.0.len()))?;
        for (c, v) in &self.0 {
            map.serialize_entry(c, v)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAmount {
    pub name: String,
    pub amount: Decimal,
}

impl CategoryAmount {
    pub fn none() -> Self {
        CategoryAmount {
            name: "None".to_string(),
            amount: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub most_spent_category: CategoryAmount,
    pub category_totals: CategoryTotals,
}

pub fn compute_summary(transactions: &[Transaction]) -> SummaryStats {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut category_totals = CategoryTotals::default();

    for tx in transactions {
        match tx.kind {
            TransactionType::Income => total_income = total_income.saturating_add(tx.amount),
            TransactionType::Expense => {
                total_expense = total_expense.saturating_add(tx.amount);
                category_totals.add(&tx.category, tx.amount);
            }
        }
    }

    SummaryStats {
        total_income,
        total_expense,
        balance: total_income.saturating_sub(total_expense),
        most_spent_category: top_category(&category_totals),
        category_totals,
    }
}

/// Strictly-greater scan from zero, so ties keep the earlier category and
/// non-positive totals never win.
pub fn top_category(totals: &CategoryTotals) -> CategoryAmount {
    let mut best = CategoryAmount::none();
    for (category, amount) in totals.iter() {
        if amount > best.amount {
            best = CategoryAmount {
                name: categories::label(category),
                amount,
            };
        }
    }
    best
}
