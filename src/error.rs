// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrakrError {
    #[error("Invalid amount '{0}': must be greater than zero")]
    InvalidAmount(Decimal),
    #[error("Invalid amount '{0}': magnitude above 1000000000000")]
    AmountTooLarge(Decimal),
    #[error("Invalid {field} '{value}'")]
    InvalidValue { field: &'static str, value: String },
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
    #[error("Record store error: {0}")]
    Store(String),
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl TrakrError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        TrakrError::InvalidValue {
            field,
            value: value.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        TrakrError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrakrError>;
