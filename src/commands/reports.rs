// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filters;
use crate::models::{Transaction, total};
use crate::repo::Repository;
use crate::report::{self, BreakdownRow, TimeRange};
use crate::settings::Settings;
use crate::summary::{SummaryStats, compute_summary};
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table, today};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub async fn handle(repo: &Repository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(repo, sub).await?,
        Some(("categories", sub)) => {
            breakdown(repo, sub, "Category", report::spending_by_category).await?
        }
        Some(("payment-methods", sub)) => {
            breakdown(repo, sub, "Method", report::spending_by_payment_method).await?
        }
        Some(("income", sub)) => {
            breakdown(repo, sub, "Source", report::income_by_category).await?
        }
        Some(("cashflow", sub)) => cashflow(repo, sub).await?,
        Some(("stats", sub)) => stats(repo, sub).await?,
        _ => {}
    }
    Ok(())
}

fn as_of(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("as_of") {
        Some(s) => Ok(parse_date(s).context("Invalid --as-of")?),
        None => Ok(today()),
    }
}

/// Narrows `transactions` to the period picked on the command line. Without
/// `--range`, `--from` or `--to`, `fallback` decides: `None` keeps everything.
pub fn select_period(
    transactions: &[Transaction],
    sub: &clap::ArgMatches,
    fallback: Option<TimeRange>,
) -> Result<Vec<Transaction>> {
    let reference = as_of(sub)?;
    if let Some(r) = sub.get_one::<String>("range") {
        let range: TimeRange = r.parse()?;
        return Ok(range.apply(transactions, reference));
    }
    let from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    let selected = match (from, to, fallback) {
        (None, None, Some(range)) => range.apply(transactions, reference),
        (None, None, None) => transactions.to_vec(),
        (from, to, _) => filters::by_date_range(
            transactions,
            from.unwrap_or(NaiveDate::MIN),
            to.unwrap_or(NaiveDate::MAX),
        ),
    };
    Ok(selected)
}

pub async fn summary_for(repo: &Repository, sub: &clap::ArgMatches) -> Result<SummaryStats> {
    let all = repo.transactions().await?;
    Ok(compute_summary(&select_period(&all, sub, None)?))
}

async fn summary(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let s = summary_for(repo, sub).await?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let ccy = Settings::load(repo).await?.currency;
    let rows = vec![
        vec!["Income".to_string(), fmt_money(&s.total_income, &ccy)],
        vec!["Expenses".to_string(), fmt_money(&s.total_expense, &ccy)],
        vec!["Balance".to_string(), fmt_money(&s.balance, &ccy)],
        vec![
            format!("Top category: {}", s.most_spent_category.name),
            fmt_money(&s.most_spent_category.amount, &ccy),
        ],
    ];
    println!("{}", pretty_table(&["", "Amount"], rows));
    Ok(())
}

async fn breakdown(
    repo: &Repository,
    sub: &clap::ArgMatches,
    heading: &str,
    compute: fn(&[Transaction]) -> Vec<BreakdownRow>,
) -> Result<()> {
    let all = repo.transactions().await?;
    let data = compute(&select_period(&all, sub, Some(TimeRange::default()))?);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let sum = total(data.iter().map(|r| r.amount));
    let rows = data
        .iter()
        .map(|r| {
            let share = r
                .amount
                .checked_div(sum)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ZERO)
                .round_dp(1);
            vec![r.name.clone(), format!("{:.2}", r.amount), format!("{}%", share)]
        })
        .collect();
    println!("{}", pretty_table(&[heading, "Amount", "Share"], rows));
    Ok(())
}

async fn cashflow(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let all = repo.transactions().await?;
    let selected = select_period(&all, sub, Some(TimeRange::default()))?;
    let flow = report::cash_flow(&selected, as_of(sub)?);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &flow)? {
        return Ok(());
    }
    let rows = flow
        .buckets
        .iter()
        .map(|b| {
            vec![
                b.label.clone(),
                format!("{:.2}", b.income),
                format!("{:.2}", b.expense),
                format!("{:.2}", b.income.saturating_sub(b.expense)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Period", "Income", "Expense", "Net"], rows)
    );
    Ok(())
}

async fn stats(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let all = repo.transactions().await?;
    let s = report::statistics(&select_period(&all, sub, Some(TimeRange::default()))?);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let ccy = Settings::load(repo).await?.currency;
    let rows = vec![
        vec!["Total income".to_string(), fmt_money(&s.total_income, &ccy)],
        vec!["Total expenses".to_string(), fmt_money(&s.total_expense, &ccy)],
        vec!["Net balance".to_string(), fmt_money(&s.balance, &ccy)],
        vec![
            "Average daily spending".to_string(),
            fmt_money(&s.average_daily_spending.round_dp(2), &ccy),
        ],
        vec![
            format!("Most expensive: {}", s.most_expensive_category.name),
            fmt_money(&s.most_expensive_category.amount, &ccy),
        ],
    ];
    println!("{}", pretty_table(&["Statistic", "Value"], rows));
    Ok(())
}
