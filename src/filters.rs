// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;

use crate::models::{Transaction, TransactionType};

fn keep(transactions: &[Transaction], pred: impl Fn(&Transaction) -> bool) -> Vec<Transaction> {
    transactions.iter().filter(|tx| pred(tx)).cloned().collect()
}

/// Inclusive on both ends.
pub fn by_date_range(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Transaction> {
    keep(transactions, |tx| tx.date >= start && tx.date <= end)
}

pub fn since(transactions: &[Transaction], start: NaiveDate) -> Vec<Transaction> {
    keep(transactions, |tx| tx.date >= start)
}

pub fn by_type(transactions: &[Transaction], kind: TransactionType) -> Vec<Transaction> {
    keep(transactions, |tx| tx.kind == kind)
}

pub fn by_category(transactions: &[Transaction], category: &str) -> Vec<Transaction> {
    keep(transactions, |tx| tx.category == category)
}

pub fn by_wallet(transactions: &[Transaction], wallet_id: &str) -> Vec<Transaction> {
    keep(transactions, |tx| tx.wallet_id.as_deref() == Some(wallet_id))
}
