// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::{Result, TrakrError};
use crate::models::{Budget, Transaction, Wallet};
use crate::store::RecordStore;
use crate::streak::Streak;

pub const TRANSACTIONS_KEY: &str = "transactions";
pub const BUDGETS_KEY: &str = "budgets";
pub const WALLETS_KEY: &str = "wallets";
pub const STREAKS_KEY: &str = "behavioralStreaks";

/// Keys wiped by `data clear`; settings survive.
pub const DATA_KEYS: [&str; 4] = [TRANSACTIONS_KEY, BUDGETS_KEY, WALLETS_KEY, STREAKS_KEY];

/// Result of recording a transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Applied {
    pub transaction: Transaction,
    /// New balance of the linked wallet, if it exists.
    pub wallet_balance: Option<Decimal>,
}

#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn RecordStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Repository { store }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Missing or unreadable keys come back as an empty collection.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                warn!(key, error = %err, "malformed records, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    pub async fn save<T: Serialize + Sync>(&self, key: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.store.set(key, &raw).await
    }

    pub async fn load_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<T>(&raw) {
            Ok(v) => Ok(Some(v)),
            Err(err) => {
                warn!(key, error = %err, "malformed value, using default");
                Ok(None)
            }
        }
    }

    pub async fn save_value<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw).await
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        self.store.remove(key).await
    }

    pub async fn transactions(&self) -> Result<Vec<Transaction>> {
        self.load(TRANSACTIONS_KEY).await
    }

    pub async fn budgets(&self) -> Result<Vec<Budget>> {
        self.load(BUDGETS_KEY).await
    }

    pub async fn wallets(&self) -> Result<Vec<Wallet>> {
        self.load(WALLETS_KEY).await
    }

    pub async fn streaks(&self) -> Result<Vec<Streak>> {
        self.load(STREAKS_KEY).await
    }

    /// Appends `tx` and moves its wallet balance in a single store write.
    /// An unknown wallet id is tolerated: the transaction is kept, no balance moves.
    pub async fn apply_transaction(&self, tx: Transaction) -> Result<Applied> {
        let mut transactions = self.transactions().await?;
        let mut wallets = self.wallets().await?;

        let wallet_balance = self.touch_wallet(&mut wallets, &tx, Wallet::apply);
        transactions.push(tx.clone());
        self.commit(&transactions, wallet_balance.map(|_| wallets.as_slice()))
            .await?;
        info!(id = %tx.id, amount = %tx.amount, kind = %tx.kind, "transaction recorded");

        Ok(Applied {
            transaction: tx,
            wallet_balance,
        })
    }

    /// Removes a transaction and undoes its wallet effect, in a single store write.
    pub async fn revert_transaction(&self, id: &str) -> Result<Applied> {
        let mut transactions = self.transactions().await?;
        let pos = transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TrakrError::not_found("Transaction", id))?;
        let tx = transactions.remove(pos);

        let mut wallets = self.wallets().await?;
        let wallet_balance = self.touch_wallet(&mut wallets, &tx, Wallet::revert);
        self.commit(&transactions, wallet_balance.map(|_| wallets.as_slice()))
            .await?;
        info!(id = %tx.id, "transaction deleted");

        Ok(Applied {
            transaction: tx,
            wallet_balance,
        })
    }

    fn touch_wallet(
        &self,
        wallets: &mut [Wallet],
        tx: &Transaction,
        effect: fn(&mut Wallet, &Transaction),
    ) -> Option<Decimal> {
        let wallet_id = tx.wallet_id.as_deref()?;
        match wallets.iter_mut().find(|w| w.id == wallet_id) {
            Some(w) => {
                effect(w, tx);
                Some(w.balance)
            }
            None => {
                warn!(wallet = wallet_id, tx = %tx.id, "wallet not found, balance unchanged");
                None
            }
        }
    }

    async fn commit(&self, transactions: &[Transaction], wallets: Option<&[Wallet]>) -> Result<()> {
        let mut entries = vec![(
            TRANSACTIONS_KEY.to_string(),
            serde_json::to_string(transactions)?,
        )];
        if let Some(w) = wallets {
            entries.push((WALLETS_KEY.to_string(), serde_json::to_string(w)?));
        }
        self.store.set_many(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn repo() -> Repository {
        Repository::new(Arc::new(MemoryStore::new()))
    }

    fn expense(amount: i64, wallet: Option<&str>) -> Transaction {
        Transaction::new(
            Decimal::from(amount),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            "food",
            TransactionType::Expense,
        )
        .unwrap()
        .with_wallet(wallet.map(String::from))
    }

    async fn seeded_wallet(repo: &Repository) -> Wallet {
        let w = Wallet::new("Bank Account", Decimal::from(2500), "USD", "#3182CE");
        repo.save(WALLETS_KEY, std::slice::from_ref(&w)).await.unwrap();
        w
    }

    #[tokio::test]
    async fn missing_keys_load_empty() {
        let repo = repo();
        assert!(repo.transactions().await.unwrap().is_empty());
        assert!(repo.load_value::<String>("trakr-currency").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_json_degrades_to_empty() {
        let repo = repo();
        repo.store().set(BUDGETS_KEY, "{not json").await.unwrap();
        assert!(repo.budgets().await.unwrap().is_empty());
        repo.store().set("trakr-shame-free", "yes please").await.unwrap();
        assert!(repo.load_value::<bool>("trakr-shame-free").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn apply_then_revert_restores_balance() {
        let repo = repo();
        let w = seeded_wallet(&repo).await;

        let applied = repo.apply_transaction(expense(1000, Some(&w.id))).await.unwrap();
        assert_eq!(applied.wallet_balance, Some(Decimal::from(1500)));
        assert_eq!(repo.transactions().await.unwrap().len(), 1);

        let reverted = repo.revert_transaction(&applied.transaction.id).await.unwrap();
        assert_eq!(reverted.wallet_balance, Some(Decimal::from(2500)));
        assert!(repo.transactions().await.unwrap().is_empty());
        assert_eq!(repo.wallets().await.unwrap()[0].balance, Decimal::from(2500));
    }

    #[tokio::test]
    async fn unknown_wallet_is_tolerated() {
        let repo = repo();
        let w = seeded_wallet(&repo).await;
        let applied = repo.apply_transaction(expense(10, Some("ghost"))).await.unwrap();
        assert_eq!(applied.wallet_balance, None);
        assert_eq!(repo.transactions().await.unwrap().len(), 1);
        assert_eq!(repo.wallets().await.unwrap()[0].balance, w.balance);
    }

    #[tokio::test]
    async fn revert_unknown_id_is_not_found() {
        let err = repo().revert_transaction("nope").await.unwrap_err();
        assert!(matches!(err, TrakrError::NotFound { .. }));
    }

    struct ReadOnlyStore(MemoryStore);

    #[async_trait]
    impl RecordStore for ReadOnlyStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key).await
        }
        async fn set_many(&self, _entries: &[(String, String)]) -> Result<()> {
            Err(TrakrError::Store("disk full".into()))
        }
        async fn remove(&self, key: &str) -> Result<()> {
            self.0.remove(key).await
        }
        async fn keys(&self) -> Result<Vec<String>> {
            self.0.keys().await
        }
    }

    #[tokio::test]
    async fn failed_write_leaves_both_keys_untouched() {
        let inner = MemoryStore::new();
        let w = Wallet::new("Cash", Decimal::from(500), "USD", "#38A169");
        inner
            .set(WALLETS_KEY, &serde_json::to_string(&[&w]).unwrap())
            .await
            .unwrap();
        let repo = Repository::new(Arc::new(ReadOnlyStore(inner)));

        let err = repo.apply_transaction(expense(50, Some(&w.id))).await.unwrap_err();
        assert!(matches!(err, TrakrError::Store(_)));
        assert!(repo.transactions().await.unwrap().is_empty());
        assert_eq!(repo.wallets().await.unwrap()[0].balance, Decimal::from(500));
    }
}
