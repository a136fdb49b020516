// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Wallet, check_magnitude};
use crate::repo::{Repository, WALLETS_KEY};
use crate::settings::Settings;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use crate::wallet::{self, WalletEdit};
use anyhow::Result;

pub async fn handle(repo: &Repository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(repo, sub).await?,
        Some(("edit", sub)) => edit(repo, sub).await?,
        Some(("rm", sub)) => {
            let key = sub.get_one::<String>("wallet").unwrap();
            let mut wallets = repo.wallets().await?;
            let removed = wallet::remove(&mut wallets, key)?;
            repo.save(WALLETS_KEY, &wallets).await?;
            println!("Removed wallet '{}'", removed.name);
        }
        Some(("default", sub)) => {
            let key = sub.get_one::<String>("wallet").unwrap();
            let mut wallets = repo.wallets().await?;
            let w = wallet::set_default(&mut wallets, key)?;
            repo.save(WALLETS_KEY, &wallets).await?;
            println!("Default wallet is now '{}'", w.name);
        }
        Some(("list", sub)) => list(repo, sub).await?,
        _ => {}
    }
    Ok(())
}

async fn add(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let balance = check_magnitude(parse_decimal(sub.get_one::<String>("balance").unwrap())?)?;
    let currency = match sub.get_one::<String>("currency") {
        Some(c) => c.trim().to_uppercase(),
        None => Settings::load(repo).await?.currency,
    };
    let color = sub.get_one::<String>("color").unwrap().trim();

    let mut wallets = repo.wallets().await?;
    let added = wallet::add(&mut wallets, Wallet::new(name, balance, &currency, color)).clone();
    repo.save(WALLETS_KEY, &wallets).await?;
    println!(
        "Added wallet '{}' ({}){} id: {}",
        added.name,
        fmt_money(&added.balance, &added.currency),
        if added.is_default { " [default]" } else { "" },
        added.id
    );
    Ok(())
}

async fn edit(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let key = sub.get_one::<String>("wallet").unwrap();
    let changes = WalletEdit {
        name: sub.get_one::<String>("name").map(|s| s.trim().to_string()),
        balance: match sub.get_one::<String>("balance") {
            Some(b) => Some(parse_decimal(b)?),
            None => None,
        },
        currency: sub.get_one::<String>("currency").map(|s| s.trim().to_string()),
        color: sub.get_one::<String>("color").map(|s| s.trim().to_string()),
    };
    let mut wallets = repo.wallets().await?;
    let w = wallet::edit(&mut wallets, key, changes)?;
    repo.save(WALLETS_KEY, &wallets).await?;
    println!("Updated wallet '{}'", w.name);
    Ok(())
}

async fn list(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let wallets = repo.wallets().await?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &wallets)? {
        return Ok(());
    }
    let mut rows: Vec<Vec<String>> = wallets
        .iter()
        .map(|w| {
            vec![
                w.id.clone(),
                w.name.clone(),
                w.currency.clone(),
                format!("{:.2}", w.balance),
                if w.is_default { "*" } else { "" }.to_string(),
            ]
        })
        .collect();
    // mixed currencies are summed as-is
    let ccy = Settings::load(repo).await?.currency;
    rows.push(vec![
        String::new(),
        "Total".into(),
        ccy,
        format!("{:.2}", wallet::total_balance(&wallets)),
        String::new(),
    ]);
    println!(
        "{}",
        pretty_table(&["Id", "Name", "CCY", "Balance", "Default"], rows)
    );
    Ok(())
}
