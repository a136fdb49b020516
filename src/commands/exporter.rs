// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories;
use crate::repo::Repository;
use crate::settings::{ExportFormat, Settings};
use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;
use tracing::info;

pub async fn handle(repo: &Repository, m: &clap::ArgMatches) -> Result<()> {
    let out = m.get_one::<String>("out").unwrap();
    let settings = Settings::load(repo).await?;
    let format = match m.get_one::<String>("format") {
        Some(f) => ExportFormat::parse(f)?,
        None => settings.export_format,
    };
    let written = export(repo, Path::new(out), format, &settings).await?;
    println!("Exported {} transactions to {}", written, out);
    Ok(())
}

/// Writes the data set to `out` and returns the number of transactions written.
pub async fn export(
    repo: &Repository,
    out: &Path,
    format: ExportFormat,
    settings: &Settings,
) -> Result<usize> {
    let transactions = repo.transactions().await?;
    match format {
        ExportFormat::Csv => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Cannot create {}", out.display()))?;
            wtr.write_record([
                "date",
                "type",
                "amount",
                "category",
                "payment_method",
                "tags",
                "wallet_id",
                "description",
            ])?;
            for t in &transactions {
                wtr.write_record([
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.amount.to_string(),
                    categories::label(&t.category),
                    t.payment_method.clone(),
                    t.tags.join(";"),
                    t.wallet_id.clone().unwrap_or_default(),
                    t.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        ExportFormat::Json => {
            let budgets = repo.budgets().await?;
            let wallets = repo.wallets().await?;
            let streaks = repo.streaks().await?;
            let doc = json!({
                "transactions": transactions,
                "budgets": budgets,
                "wallets": wallets,
                "behavioralStreaks": streaks,
                "settings": settings,
            });
            std::fs::write(out, serde_json::to_string_pretty(&doc)?)
                .with_context(|| format!("Cannot write {}", out.display()))?;
        }
    }
    info!(path = %out.display(), format = format.as_str(), "export written");
    Ok(transactions.len())
}
