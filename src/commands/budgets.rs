// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::{BudgetProgress, compute_budget_progress};
use crate::categories;
use crate::error::TrakrError;
use crate::models::{Budget, BudgetPeriod};
use crate::repo::{BUDGETS_KEY, Repository};
use crate::settings::Settings;
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table, start_of_month, today,
};
use anyhow::{Result, bail};
use serde::Serialize;
use tracing::{info, warn};

pub async fn handle(repo: &Repository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(repo, sub).await?,
        Some(("edit", sub)) => edit(repo, sub).await?,
        Some(("rm", sub)) => remove(repo, sub).await?,
        Some(("list", sub)) => list(repo, sub).await?,
        Some(("progress", sub)) => progress(repo, sub).await?,
        _ => {}
    }
    Ok(())
}

fn check_category(category: &str) {
    if categories::find(category).is_none() {
        warn!(category, "unknown category, budget will match it verbatim");
    }
}

async fn add(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let period: BudgetPeriod = sub.get_one::<String>("period").unwrap().parse()?;
    let start = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => start_of_month(today()),
    };
    check_category(&category);

    let mut budget = Budget::new(&category, amount, period, start)?;
    if let Some(end) = sub.get_one::<String>("end") {
        let end = parse_date(end)?;
        if end < start {
            bail!("Budget end {} is before its start {}", end, start);
        }
        budget.end_date = Some(end);
    }

    let mut budgets = repo.budgets().await?;
    budgets.push(budget.clone());
    repo.save(BUDGETS_KEY, &budgets).await?;
    info!(id = %budget.id, category = %budget.category, "budget created");
    println!(
        "Budget for {} set to {} {} (id: {})",
        categories::label(&budget.category),
        budget.amount,
        budget.period,
        budget.id
    );
    Ok(())
}

async fn edit(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let category = sub.get_one::<String>("category").map(|s| s.trim().to_string());
    let amount = match sub.get_one::<String>("amount") {
        Some(a) => Some(parse_decimal(a)?),
        None => None,
    };
    let period = match sub.get_one::<String>("period") {
        Some(p) => Some(p.parse::<BudgetPeriod>()?),
        None => None,
    };
    if let Some(ref c) = category {
        check_category(c);
    }

    let mut budgets = repo.budgets().await?;
    let budget = budgets
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| TrakrError::not_found("Budget", id))?;
    budget.revise(category.as_deref(), amount, period)?;
    let label = categories::label(&budget.category);
    repo.save(BUDGETS_KEY, &budgets).await?;
    println!("Budget {} updated ({})", id, label);
    Ok(())
}

async fn remove(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut budgets = repo.budgets().await?;
    let before = budgets.len();
    budgets.retain(|b| b.id != id);
    if budgets.len() == before {
        return Err(TrakrError::not_found("Budget", id).into());
    }
    repo.save(BUDGETS_KEY, &budgets).await?;
    println!("Removed budget {}", id);
    Ok(())
}

async fn list(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let budgets = repo.budgets().await?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budgets)? {
        let rows = budgets
            .iter()
            .map(|b| {
                vec![
                    b.id.clone(),
                    categories::label(&b.category),
                    format!("{:.2}", b.amount),
                    b.period.to_string(),
                    b.start_date.to_string(),
                    b.end_date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Category", "Budget", "Period", "Start", "End"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRow {
    pub budget: Budget,
    pub category_name: String,
    #[serde(flatten)]
    pub progress: BudgetProgress,
}

pub async fn progress_rows(repo: &Repository) -> Result<Vec<ProgressRow>> {
    let transactions = repo.transactions().await?;
    let rows = repo
        .budgets()
        .await?
        .into_iter()
        .map(|b| ProgressRow {
            category_name: categories::label(&b.category),
            progress: compute_budget_progress(&b, &transactions),
            budget: b,
        })
        .collect();
    Ok(rows)
}

async fn progress(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let data = progress_rows(repo).await?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = Settings::load(repo).await?.currency;
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.category_name.clone(),
                fmt_money(&r.budget.amount, &ccy),
                fmt_money(&r.progress.total_spent, &ccy),
                format!("{}%", r.progress.percentage),
                fmt_money(&r.progress.remaining, &ccy),
                if r.progress.over_budget { "yes" } else { "" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Category", "Budget", "Spent", "Used", "Remaining", "Over"],
            rows
        )
    );
    Ok(())
}
