// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories;
use crate::filters;
use crate::models::{Transaction, TransactionType};
use crate::repo::Repository;
use crate::settings::Settings;
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, parse_tags, pretty_table, today,
};
use crate::wallet;
use anyhow::{Result, anyhow};
use tracing::warn;

pub async fn handle(repo: &Repository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(repo, sub).await?,
        Some(("list", sub)) => list(repo, sub).await?,
        Some(("rm", sub)) => remove(repo, sub).await?,
        _ => {}
    }
    Ok(())
}

async fn add(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let method = sub.get_one::<String>("payment_method").unwrap().trim();
    let tags = sub
        .get_one::<String>("tags")
        .map(|s| parse_tags(s))
        .unwrap_or_default();
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match categories::find(&category) {
        Some(c) if !c.kind.accepts(kind) => {
            warn!(category = %category, kind = %kind, "category does not fit this transaction type")
        }
        None => warn!(category = %category, "unknown category, storing as given"),
        _ => {}
    }

    let wallets = repo.wallets().await?;
    let wallet_id = match sub.get_one::<String>("wallet") {
        Some(key) => Some(
            wallet::find(&wallets, key)
                .map(|w| w.id.clone())
                .unwrap_or_else(|| key.trim().to_string()),
        ),
        None => None,
    };

    let tx = Transaction::new(amount, date, &category, kind)?
        .with_payment_method(method)
        .with_tags(tags)
        .with_description(description)
        .with_wallet(wallet_id);
    let applied = repo.apply_transaction(tx).await?;

    let ccy = Settings::load(repo).await?.currency;
    println!(
        "Recorded {} {} on {} in '{}' (id: {})",
        applied.transaction.kind,
        fmt_money(&applied.transaction.amount, &ccy),
        applied.transaction.date,
        categories::label(&applied.transaction.category),
        applied.transaction.id
    );
    if let Some(bal) = applied.wallet_balance {
        println!("Wallet balance now {}", fmt_money(&bal, &ccy));
    }
    Ok(())
}

async fn remove(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let reverted = repo.revert_transaction(id).await?;
    println!(
        "Deleted transaction {} ({} {})",
        reverted.transaction.id, reverted.transaction.kind, reverted.transaction.amount
    );
    Ok(())
}

async fn list(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(repo, sub).await?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.clone(),
                    t.date.to_string(),
                    t.kind.to_string(),
                    format!("{:.2}", t.amount),
                    categories::label(&t.category),
                    t.payment_method.clone(),
                    t.tags.join(", "),
                    t.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Amount", "Category", "Method", "Tags", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

pub async fn query_rows(repo: &Repository, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let mut data = repo.transactions().await?;

    if let Some(from) = sub.get_one::<String>("from") {
        data = filters::since(&data, parse_date(from)?);
    }
    if let Some(to) = sub.get_one::<String>("to") {
        data = filters::by_date_range(&data, chrono::NaiveDate::MIN, parse_date(to)?);
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        data = filters::by_type(&data, kind.parse()?);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        data = filters::by_category(&data, cat.trim());
    }
    if let Some(key) = sub.get_one::<String>("wallet") {
        let wallets = repo.wallets().await?;
        let w = wallet::find(&wallets, key).ok_or_else(|| anyhow!("Wallet '{}' not found", key))?;
        data = filters::by_wallet(&data, &w.id);
    }

    // newest first; same-day entries in reverse insertion order
    data.reverse();
    data.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
