// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User preferences, one `trakr-*` record per field.

use serde::Serialize;

use crate::error::{Result, TrakrError};
use crate::repo::Repository;

const CURRENCY: &str = "trakr-currency";
const LANGUAGE: &str = "trakr-language";
const NOTIFICATIONS: &str = "trakr-notifications";
const SHAME_FREE: &str = "trakr-shame-free";
const BACKUP_FREQUENCY: &str = "trakr-backup-frequency";
const EXPORT_FORMAT: &str = "trakr-export-format";
const DISPLAY_NAME: &str = "trakr-display-name";
const EMAIL: &str = "trakr-email";

pub const BACKUP_FREQUENCIES: [&str; 4] = ["daily", "weekly", "monthly", "never"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(TrakrError::invalid("export format", other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub currency: String,
    pub language: String,
    pub notifications: bool,
    pub shame_free_mode: bool,
    pub backup_frequency: String,
    pub export_format: ExportFormat,
    pub display_name: String,
    pub email: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency: "USD".into(),
            language: "en-US".into(),
            notifications: true,
            shame_free_mode: false,
            backup_frequency: "weekly".into(),
            export_format: ExportFormat::Csv,
            display_name: String::new(),
            email: String::new(),
        }
    }
}

impl Settings {
    pub async fn load(repo: &Repository) -> Result<Self> {
        let d = Settings::default();
        let export_format = match repo.load_value::<String>(EXPORT_FORMAT).await? {
            Some(raw) => ExportFormat::parse(&raw).unwrap_or(d.export_format),
            None => d.export_format,
        };
        Ok(Settings {
            currency: repo.load_value(CURRENCY).await?.unwrap_or(d.currency),
            language: repo.load_value(LANGUAGE).await?.unwrap_or(d.language),
            notifications: repo
                .load_value(NOTIFICATIONS)
                .await?
                .unwrap_or(d.notifications),
            shame_free_mode: repo
                .load_value(SHAME_FREE)
                .await?
                .unwrap_or(d.shame_free_mode),
            backup_frequency: repo
                .load_value(BACKUP_FREQUENCY)
                .await?
                .unwrap_or(d.backup_frequency),
            export_format,
            display_name: repo.load_value(DISPLAY_NAME).await?.unwrap_or(d.display_name),
            email: repo.load_value(EMAIL).await?.unwrap_or(d.email),
        })
    }

    /// Validates and stores a single setting by its user-facing name.
    pub async fn set(repo: &Repository, name: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match name.trim() {
            "currency" => {
                if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(TrakrError::invalid("currency", value));
                }
                repo.save_value(CURRENCY, &value.to_uppercase()).await
            }
            "language" => repo.save_value(LANGUAGE, &value).await,
            "notifications" => repo.save_value(NOTIFICATIONS, &parse_flag(value)?).await,
            "shame-free" => repo.save_value(SHAME_FREE, &parse_flag(value)?).await,
            "backup-frequency" => {
                let v = value.to_lowercase();
                if !BACKUP_FREQUENCIES.contains(&v.as_str()) {
                    return Err(TrakrError::invalid("backup frequency", value));
                }
                repo.save_value(BACKUP_FREQUENCY, &v).await
            }
            "export-format" => {
                let f = ExportFormat::parse(value)?;
                repo.save_value(EXPORT_FORMAT, &f.as_str()).await
            }
            "display-name" => repo.save_value(DISPLAY_NAME, &value).await,
            "email" => repo.save_value(EMAIL, &value).await,
            other => Err(TrakrError::invalid("setting", other)),
        }
    }
}

fn parse_flag(v: &str) -> Result<bool> {
    match v.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(TrakrError::invalid("flag", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn defaults_then_overrides() {
        let repo = Repository::new(Arc::new(MemoryStore::new()));
        assert_eq!(Settings::load(&repo).await.unwrap(), Settings::default());

        Settings::set(&repo, "currency", "eur").await.unwrap();
        Settings::set(&repo, "shame-free", "on").await.unwrap();
        Settings::set(&repo, "export-format", "JSON").await.unwrap();
        let s = Settings::load(&repo).await.unwrap();
        assert_eq!(s.currency, "EUR");
        assert!(s.shame_free_mode);
        assert_eq!(s.export_format, ExportFormat::Json);
    }

    #[tokio::test]
    async fn rejects_bad_values() {
        let repo = Repository::new(Arc::new(MemoryStore::new()));
        assert!(Settings::set(&repo, "currency", "euro").await.is_err());
        assert!(Settings::set(&repo, "notifications", "maybe").await.is_err());
        assert!(Settings::set(&repo, "backup-frequency", "hourly").await.is_err());
        assert!(Settings::set(&repo, "theme", "dark").await.is_err());
    }
}
