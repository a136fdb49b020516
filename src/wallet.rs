// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wallet list edits. These keep the "at most one default" rule; balances only
//! move through [`crate::repo::Repository::apply_transaction`] or an explicit edit.

use rust_decimal::Decimal;

use crate::error::{Result, TrakrError};
use crate::models::{Wallet, check_magnitude, total};

/// Matches by id first, then by case-insensitive name.
pub fn find<'a>(wallets: &'a [Wallet], key: &str) -> Option<&'a Wallet> {
    let key = key.trim();
    wallets
        .iter()
        .find(|w| w.id == key)
        .or_else(|| wallets.iter().find(|w| w.name.eq_ignore_ascii_case(key)))
}

fn position(wallets: &[Wallet], key: &str) -> Result<usize> {
    let id = find(wallets, key)
        .map(|w| w.id.clone())
        .ok_or_else(|| TrakrError::not_found("Wallet", key))?;
    wallets
        .iter()
        .position(|w| w.id == id)
        .ok_or_else(|| TrakrError::not_found("Wallet", key))
}

/// The first wallet ever added becomes the default.
pub fn add(wallets: &mut Vec<Wallet>, mut wallet: Wallet) -> &Wallet {
    wallet.is_default = wallets.is_empty();
    wallets.push(wallet);
    &wallets[wallets.len() - 1]
}

#[derive(Debug, Default, Clone)]
pub struct WalletEdit {
    pub name: Option<String>,
    pub balance: Option<Decimal>,
    pub currency: Option<String>,
    pub color: Option<String>,
}

pub fn edit(wallets: &mut [Wallet], key: &str, changes: WalletEdit) -> Result<Wallet> {
    let idx = position(wallets, key)?;
    let balance = changes.balance.map(check_magnitude).transpose()?;
    let w = &mut wallets[idx];
    if let Some(n) = changes.name {
        w.name = n;
    }
    if let Some(b) = balance {
        w.balance = b;
    }
    if let Some(c) = changes.currency {
        w.currency = c.to_uppercase();
    }
    if let Some(c) = changes.color {
        w.color = c;
    }
    Ok(w.clone())
}

/// Deleting the default wallet hands the flag to the first one left.
pub fn remove(wallets: &mut Vec<Wallet>, key: &str) -> Result<Wallet> {
    let idx = position(wallets, key)?;
    let removed = wallets.remove(idx);
    if removed.is_default {
        if let Some(first) = wallets.first_mut() {
            first.is_default = true;
        }
    }
    Ok(removed)
}

pub fn set_default(wallets: &mut [Wallet], key: &str) -> Result<Wallet> {
    let idx = position(wallets, key)?;
    for (i, w) in wallets.iter_mut().enumerate() {
        w.is_default = i == idx;
    }
    Ok(wallets[idx].clone())
}

pub fn total_balance(wallets: &[Wallet]) -> Decimal {
    total(wallets.iter().map(|w| w.balance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults(wallets: &[Wallet]) -> Vec<&str> {
        wallets
            .iter()
            .filter(|w| w.is_default)
            .map(|w| w.name.as_str())
            .collect()
    }

    fn three() -> Vec<Wallet> {
        let mut ws = Vec::new();
        add(&mut ws, Wallet::new("Cash", Decimal::from(500), "USD", "#38A169"));
        add(&mut ws, Wallet::new("Bank Account", Decimal::from(2500), "USD", "#3182CE"));
        add(&mut ws, Wallet::new("Savings", Decimal::from(10000), "USD", "#805AD5"));
        ws
    }

    #[test]
    fn first_added_is_default() {
        let ws = three();
        assert_eq!(defaults(&ws), vec!["Cash"]);
        assert_eq!(total_balance(&ws), Decimal::from(13000));
    }

    #[test]
    fn lookup_by_id_or_name() {
        let ws = three();
        let id = ws[1].id.clone();
        assert_eq!(find(&ws, &id).map(|w| w.name.as_str()), Some("Bank Account"));
        assert_eq!(find(&ws, "savings").map(|w| w.name.as_str()), Some("Savings"));
        assert!(find(&ws, "Wallet X").is_none());
    }

    #[test]
    fn edit_rejects_balance_above_ceiling() {
        let mut ws = three();
        let changes = WalletEdit {
            name: Some("Renamed".into()),
            balance: Some(Decimal::MAX),
            ..WalletEdit::default()
        };
        assert!(edit(&mut ws, "Cash", changes).is_err());
        assert_eq!(ws[0].name, "Cash");
        assert_eq!(ws[0].balance, Decimal::from(500));
    }

    #[test]
    fn set_default_is_exclusive() {
        let mut ws = three();
        set_default(&mut ws, "Savings").unwrap();
        assert_eq!(defaults(&ws), vec!["Savings"]);
        assert!(set_default(&mut ws, "nope").is_err());
        assert_eq!(defaults(&ws), vec!["Savings"]);
    }

    #[test]
    fn removing_default_promotes_first_remaining() {
        let mut ws = three();
        let gone = remove(&mut ws, "Cash").unwrap();
        assert!(gone.is_default);
        assert_eq!(defaults(&ws), vec!["Bank Account"]);
        remove(&mut ws, "Savings").unwrap();
        assert_eq!(defaults(&ws), vec!["Bank Account"]);
    }

    #[test]
    fn edit_updates_selected_fields() {
        let mut ws = three();
        let w = edit(
            &mut ws,
            "bank account",
            WalletEdit {
                balance: Some(Decimal::from(42)),
                currency: Some("eur".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(w.balance, Decimal::from(42));
        assert_eq!(w.currency, "EUR");
        assert_eq!(w.name, "Bank Account");
        assert_eq!(ws[1], w);
    }
}
