// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Breakdowns behind the `report` subcommands. Callers pass the slice already
//! narrowed to the period they want.

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::categories;
use crate::error::TrakrError;
use crate::filters;
use crate::models::{Transaction, TransactionType, total};
use crate::summary::{CategoryAmount, CategoryTotals, top_category};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl TimeRange {
    pub fn days(&self) -> u64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
            TimeRange::Year => 365,
        }
    }

    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(self.days()))
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn apply(&self, transactions: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
        filters::since(transactions, self.start(today))
    }
}

impl FromStr for TimeRange {
    type Err = TrakrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7days" | "7d" | "week" => Ok(TimeRange::Week),
            "30days" | "30d" | "month" => Ok(TimeRange::Month),
            "90days" | "90d" | "quarter" => Ok(TimeRange::Quarter),
            "year" | "365days" => Ok(TimeRange::Year),
            other => Err(TrakrError::invalid("time range", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub key: String,
    pub name: String,
    pub amount: Decimal,
}

fn sorted_desc(mut rows: Vec<BreakdownRow>) -> Vec<BreakdownRow> {
    // stable: equal amounts keep first-seen order
    rows.sort_by(|a, b| b.amount.cmp(&a.amount));
    rows
}

fn totals_where(
    transactions: &[Transaction],
    kind: TransactionType,
    key: impl Fn(&Transaction) -> &str,
) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for tx in transactions.iter().filter(|tx| tx.kind == kind) {
        totals.add(key(tx), tx.amount);
    }
    totals
}

pub fn spending_by_category(transactions: &[Transaction]) -> Vec<BreakdownRow> {
    by_category(transactions, TransactionType::Expense)
}

pub fn income_by_category(transactions: &[Transaction]) -> Vec<BreakdownRow> {
    by_category(transactions, TransactionType::Income)
}

fn by_category(transactions: &[Transaction], kind: TransactionType) -> Vec<BreakdownRow> {
    let rows = totals_where(transactions, kind, |tx| &tx.category)
        .iter()
        .map(|(id, amount)| BreakdownRow {
            key: id.to_string(),
            name: categories::label(id),
            amount,
        })
        .collect();
    sorted_desc(rows)
}

pub fn spending_by_payment_method(transactions: &[Transaction]) -> Vec<BreakdownRow> {
    let rows = totals_where(transactions, TransactionType::Expense, |tx| &tx.payment_method)
        .iter()
        .map(|(method, amount)| BreakdownRow {
            key: method.to_string(),
            name: method.to_string(),
            amount,
        })
        .collect();
    sorted_desc(rows)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    /// Coarser buckets the further back the oldest transaction sits.
    pub fn for_span(days: i64) -> Self {
        if days > 60 {
            Granularity::Month
        } else if days > 14 {
            Granularity::Week
        } else {
            Granularity::Day
        }
    }

    fn bucket(&self, date: NaiveDate) -> (NaiveDate, String) {
        match self {
            Granularity::Day => (date, date.format("%Y-%m-%d").to_string()),
            Granularity::Week => {
                let week = date.day().div_ceil(7);
                let first = date.with_day((week - 1) * 7 + 1).unwrap_or(date);
                (first, format!("{} W{}", date.format("%b"), week))
            }
            Granularity::Month => {
                let first = date.with_day(1).unwrap_or(date);
                (first, date.format("%b %Y").to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowBucket {
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlow {
    pub granularity: Granularity,
    pub buckets: Vec<CashFlowBucket>,
}

pub fn cash_flow(transactions: &[Transaction], today: NaiveDate) -> CashFlow {
    let oldest = transactions
        .iter()
        .map(|tx| tx.date)
        .min()
        .unwrap_or_else(|| TimeRange::Month.start(today));
    let granularity = Granularity::for_span((today - oldest).num_days());

    let mut buckets: BTreeMap<NaiveDate, CashFlowBucket> = BTreeMap::new();
    for tx in transactions {
        let (start, label) = granularity.bucket(tx.date);
        let entry = buckets.entry(start).or_insert_with(|| CashFlowBucket {
            label,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        });
        match tx.kind {
            TransactionType::Income => entry.income = entry.income.saturating_add(tx.amount),
            TransactionType::Expense => {
                entry.expense = entry.expense.saturating_add(tx.amount)
            }
        }
    }
    CashFlow {
        granularity,
        buckets: buckets.into_values().collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatistics {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub average_daily_spending: Decimal,
    pub most_expensive_category: CategoryAmount,
}

pub fn statistics(transactions: &[Transaction]) -> ReportStatistics {
    let expenses = filters::by_type(transactions, TransactionType::Expense);
    let total_income = total(
        transactions
            .iter()
            .filter(|tx| tx.kind == TransactionType::Income)
            .map(|tx| tx.amount),
    );
    let total_expense = total(expenses.iter().map(|tx| tx.amount));

    let spending_days: HashSet<NaiveDate> = expenses.iter().map(|tx| tx.date).collect();
    let average_daily_spending = if spending_days.is_empty() {
        Decimal::ZERO
    } else {
        total_expense / Decimal::from(spending_days.len())
    };

    ReportStatistics {
        total_income,
        total_expense,
        balance: total_income.saturating_sub(total_expense),
        average_daily_spending,
        most_expensive_category: top_category(&totals_where(
            transactions,
            TransactionType::Expense,
            |tx| &tx.category,
        )),
    }
}
