// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::models::TransactionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    Both,
}

impl CategoryKind {
    pub fn accepts(&self, kind: TransactionType) -> bool {
        matches!(
            (self, kind),
            (CategoryKind::Both, _)
                | (CategoryKind::Income, TransactionType::Income)
                | (CategoryKind::Expense, TransactionType::Expense)
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

static CATALOG: Lazy<Vec<Category>> = Lazy::new(|| {
    use CategoryKind::*;
    [
        ("food", "Food & Dining", "#38B2AC", Expense),
        ("transportation", "Transportation", "#4299E1", Expense),
        ("utilities", "Utilities", "#9F7AEA", Expense),
        ("entertainment", "Entertainment", "#ED8936", Expense),
        ("shopping", "Shopping", "#F56565", Expense),
        ("health", "Health", "#48BB78", Expense),
        ("housing", "Housing", "#805AD5", Expense),
        ("salary", "Salary", "#38A169", Income),
        ("freelance", "Freelance", "#68D391", Income),
        ("gifts", "Gifts", "#4FD1C5", Income),
        ("other_income", "Other Income", "#81E6D9", Income),
        ("other_expense", "Other Expense", "#CBD5E0", Expense),
    ]
    .into_iter()
    .map(|(id, name, color, kind)| Category {
        id,
        name,
        color,
        kind,
    })
    .collect()
});

pub fn all() -> &'static [Category] {
    &CATALOG
}

pub fn find(id: &str) -> Option<&'static Category> {
    CATALOG.iter().find(|c| c.id == id)
}

/// Display label for a category id; unknown ids are shown verbatim.
pub fn label(id: &str) -> String {
    find(id).map(|c| c.name.to_string()).unwrap_or_else(|| id.to_string())
}
