// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, Months, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrakrError};
use crate::utils::new_id;

/// Largest accepted amount, budget target or wallet balance magnitude: one
/// trillion currency units.
pub fn max_amount() -> Decimal {
    Decimal::from(1_000_000_000_000_i64)
}

/// Rejects values whose magnitude is above [`max_amount`].
pub fn check_magnitude(value: Decimal) -> Result<Decimal> {
    if value.abs() > max_amount() {
        return Err(TrakrError::AmountTooLarge(value));
    }
    Ok(value)
}

/// Positive and within [`max_amount`].
fn check_positive(amount: Decimal) -> Result<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(TrakrError::InvalidAmount(amount));
    }
    check_magnitude(amount)
}

/// Sums money without panicking; stored data past the ceiling pins at the
/// Decimal bounds.
pub fn total(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, d| acc.saturating_add(d))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = TrakrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(TrakrError::invalid("transaction type", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
}

impl Transaction {
    /// Entry point for user-submitted transactions; the only place the amount is checked.
    pub fn new(
        amount: Decimal,
        date: NaiveDate,
        category: &str,
        kind: TransactionType,
    ) -> Result<Self> {
        let amount = check_positive(amount)?;
        Ok(Transaction {
            id: new_id(),
            amount,
            date,
            category: category.to_string(),
            description: None,
            kind,
            payment_method: String::new(),
            tags: Vec::new(),
            wallet_id: None,
        })
    }

    pub fn with_payment_method(mut self, method: &str) -> Self {
        self.payment_method = method.to_string();
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_wallet(mut self, wallet_id: Option<String>) -> Self {
        self.wallet_id = wallet_id;
        self
    }

    /// Signed effect of this transaction on a wallet balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }

    /// Inclusive end of a budget window opened on `start`.
    pub fn window_end(&self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            BudgetPeriod::Weekly => start.checked_add_days(Days::new(7)),
            BudgetPeriod::Monthly => start
                .checked_add_months(Months::new(1))
                .and_then(|d| d.pred_opt()),
            BudgetPeriod::Yearly => start
                .checked_add_months(Months::new(12))
                .and_then(|d| d.pred_opt()),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = TrakrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(BudgetPeriod::Weekly),
            "monthly" => Ok(BudgetPeriod::Monthly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            other => Err(TrakrError::invalid("budget period", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    #[serde(with = "iso_date")]
    pub start_date: NaiveDate,
    #[serde(default, with = "iso_date_opt", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Budget {
    /// Opens a budget window at `start`; the end follows from the period.
    pub fn new(
        category: &str,
        amount: Decimal,
        period: BudgetPeriod,
        start: NaiveDate,
    ) -> Result<Self> {
        let amount = check_positive(amount)?;
        Ok(Budget {
            id: new_id(),
            category: category.to_string(),
            amount,
            period,
            start_date: start,
            end_date: period.window_end(start),
        })
    }

    /// Replaces category, amount and period. A period change re-derives the
    /// window end from the existing start date.
    pub fn revise(
        &mut self,
        category: Option<&str>,
        amount: Option<Decimal>,
        period: Option<BudgetPeriod>,
    ) -> Result<()> {
        if let Some(a) = amount {
            self.amount = check_positive(a)?;
        }
        if let Some(c) = category {
            self.category = c.to_string();
        }
        if let Some(p) = period {
            if p != self.period {
                self.period = p;
                self.end_date = p.window_end(self.start_date);
            }
        }
        Ok(())
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.is_none_or(|end| date <= end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub balance: Decimal,
    pub currency: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Wallet {
    pub fn new(name: &str, balance: Decimal, currency: &str, color: &str) -> Self {
        Wallet {
            id: new_id(),
            name: name.to_string(),
            balance,
            currency: currency.to_uppercase(),
            color: color.to_string(),
            is_default: false,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, tx: &Transaction) {
        self.balance = self.balance.saturating_add(tx.signed_amount());
    }

    pub fn revert(&mut self, tx: &Transaction) {
        self.balance = self.balance.saturating_sub(tx.signed_amount());
    }
}

/// Reads `YYYY-MM-DD` or an RFC 3339 date-time, keeping the calendar date as
/// written (no time zone shift). Anything else is rejected.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() == 10 {
        return NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_iso_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
    }
}

mod iso_date_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => super::iso_date::serialize(d, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        match raw {
            None => Ok(None),
            Some(r) => super::parse_iso_date(&r)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", r))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn food(amount: Decimal) -> Result<Transaction> {
        Transaction::new(amount, date("2024-01-02"), "food", TransactionType::Expense)
    }

    fn monthly_food(amount: &str) -> Budget {
        Budget::new("food", dec(amount), BudgetPeriod::Monthly, date("2024-01-01")).unwrap()
    }

    #[test]
    fn transaction_rejects_non_positive_amount() {
        let err = food(Decimal::ZERO).unwrap_err();
        assert!(matches!(err, TrakrError::InvalidAmount(_)));
        assert!(food(dec("-5")).is_err());
    }

    #[test]
    fn amounts_above_ceiling_are_rejected() {
        let on = date("2024-01-01");
        let err = Transaction::new(Decimal::MAX, on, "food", TransactionType::Income).unwrap_err();
        assert!(matches!(err, TrakrError::AmountTooLarge(_)));
        assert!(Transaction::new(max_amount(), on, "food", TransactionType::Income).is_ok());
        assert!(Budget::new("food", Decimal::MAX, BudgetPeriod::Weekly, on).is_err());

        let mut b = Budget::new("food", dec("10"), BudgetPeriod::Weekly, on).unwrap();
        assert!(b.revise(None, Some(max_amount() + Decimal::ONE), None).is_err());
        assert_eq!(b.amount, dec("10"));
        assert!(check_magnitude(-max_amount()).is_ok());
        assert!(check_magnitude(dec("-1000000000000.01")).is_err());
    }

    #[test]
    fn wallet_balance_saturates_instead_of_overflowing() {
        let mut w = Wallet::new("Main", dec("-1"), "USD", "#3182CE");
        let mut tx = food(dec("1")).unwrap();
        tx.amount = Decimal::MAX;
        w.apply(&tx);
        assert_eq!(w.balance, Decimal::MIN);
        w.revert(&tx);
        assert!(w.balance.is_zero());
    }

    #[test]
    fn transaction_reads_browser_style_json() {
        let raw = r#"{"id":"1","amount":1000,"date":"2024-03-05T10:15:00.000Z","category":"food",
            "description":"Weekly groceries","type":"expense","paymentMethod":"Credit Card",
            "tags":["essential"],"walletId":"bank"}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.date, date("2024-03-05"));
        assert_eq!(tx.amount, dec("1000"));
        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.wallet_id.as_deref(), Some("bank"));
        assert_eq!(tx.tags, vec!["essential".to_string()]);
    }

    #[test]
    fn date_input_must_be_exact() {
        assert_eq!(parse_iso_date(" 2024-03-05 "), Some(date("2024-03-05")));
        assert_eq!(parse_iso_date("2024-03-05T23:30:00-05:00"), Some(date("2024-03-05")));
        assert_eq!(parse_iso_date("2024-03-05T10:15:00"), Some(date("2024-03-05")));
        assert_eq!(parse_iso_date("2024-03-051"), None);
        assert_eq!(parse_iso_date("2024-03-05junk"), None);
        assert_eq!(parse_iso_date("2024-3-5"), None);
    }

    #[test]
    fn budget_window_per_period() {
        let start = date("2024-02-01");
        assert_eq!(BudgetPeriod::Weekly.window_end(start), Some(date("2024-02-08")));
        assert_eq!(BudgetPeriod::Monthly.window_end(start), Some(date("2024-02-29")));
        assert_eq!(BudgetPeriod::Yearly.window_end(start), Some(date("2025-01-31")));
    }

    #[test]
    fn budget_revise_recomputes_end_on_period_change() {
        let mut b = monthly_food("200");
        assert_eq!(b.end_date, Some(date("2024-01-31")));
        b.revise(None, Some(dec("300")), Some(BudgetPeriod::Weekly)).unwrap();
        assert_eq!(b.amount, dec("300"));
        assert_eq!(b.end_date, Some(date("2024-01-08")));
        assert!(b.revise(None, Some(Decimal::ZERO), None).is_err());
        assert_eq!(b.amount, dec("300"));
    }

    #[test]
    fn budget_covers_is_end_inclusive() {
        let mut b = monthly_food("200");
        assert!(b.covers(date("2024-01-31")));
        assert!(!b.covers(date("2024-02-01")));
        assert!(!b.covers(date("2023-12-31")));
        b.end_date = None;
        assert!(b.covers(date("2030-01-01")));
    }

    #[test]
    fn wallet_apply_and_revert_are_inverse() {
        let mut w = Wallet::new("Cash", dec("500"), "usd", "#38A169");
        let tx = food(dec("42.50")).unwrap();
        w.apply(&tx);
        assert_eq!(w.balance, dec("457.50"));
        w.revert(&tx);
        assert_eq!(w.balance, dec("500"));
        assert_eq!(w.currency, "USD");
    }
}
