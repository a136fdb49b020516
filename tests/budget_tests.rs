// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use trakr::cli::build_cli;
use trakr::commands::{self, budgets};
use trakr::models::BudgetPeriod;
use trakr::repo::Repository;
use trakr::store::MemoryStore;

fn setup() -> Repository {
    Repository::new(Arc::new(MemoryStore::new()))
}

async fn run(repo: &Repository, line: &str) -> anyhow::Result<()> {
    let args = std::iter::once("trakr").chain(line.split_whitespace());
    let m = build_cli().try_get_matches_from(args)?;
    commands::dispatch(repo, &m).await?;
    Ok(())
}

#[tokio::test]
async fn monthly_budget_progress() {
    let repo = setup();
    run(&repo, "budget add --category food --amount 1000 --start 2024-03-01").await.unwrap();
    for (amount, date) in [("400", "2024-03-03"), ("300", "2024-03-17"), ("500", "2024-04-02")] {
        let line = format!("tx add --amount {amount} --category food --date {date}");
        run(&repo, &line).await.unwrap();
    }
    run(&repo, "tx add --amount 90 --category shopping --date 2024-03-10").await.unwrap();

    let rows = budgets::progress_rows(&repo).await.unwrap();
    assert_eq!(rows.len(), 1);
    let b = &rows[0];
    assert_eq!(b.category_name, "Food & Dining");
    assert_eq!(b.budget.end_date, NaiveDate::from_ymd_opt(2024, 3, 31));
    assert_eq!(b.progress.total_spent, Decimal::from(700));
    assert_eq!(b.progress.percentage, 70);
    assert_eq!(b.progress.remaining, Decimal::from(300));
    assert!(!b.progress.over_budget);
}

#[tokio::test]
async fn zero_amount_is_rejected() {
    let repo = setup();
    assert!(run(&repo, "budget add --category food --amount 0").await.is_err());
    assert!(run(&repo, "budget add --category food --amount 10 --period daily").await.is_err());
    assert!(run(&repo, "budget add --category food --amount 1000000000001").await.is_err());
    assert!(repo.budgets().await.unwrap().is_empty());
}

#[tokio::test]
async fn edit_recomputes_window_and_rm_deletes() {
    let repo = setup();
    run(&repo, "budget add --category health --amount 50 --start 2024-05-06 --period weekly")
        .await
        .unwrap();
    let id = repo.budgets().await.unwrap()[0].id.clone();
    let end = repo.budgets().await.unwrap()[0].end_date;
    assert_eq!(end, NaiveDate::from_ymd_opt(2024, 5, 13));

    run(&repo, &format!("budget edit {id} --period yearly --amount 600")).await.unwrap();
    let b = repo.budgets().await.unwrap()[0].clone();
    assert_eq!(b.period, BudgetPeriod::Yearly);
    assert_eq!(b.amount, Decimal::from(600));
    assert_eq!(b.end_date, NaiveDate::from_ymd_opt(2025, 5, 5));

    assert!(run(&repo, &format!("budget edit {id} --amount -1")).await.is_err());
    run(&repo, &format!("budget rm {id}")).await.unwrap();
    assert!(repo.budgets().await.unwrap().is_empty());
    assert!(run(&repo, &format!("budget rm {id}")).await.is_err());
}

#[tokio::test]
async fn overspending_is_clamped() {
    let repo = setup();
    let budget = "budget add --category entertainment --amount 100";
    run(&repo, &format!("{budget} --start 2024-03-01 --end 2024-03-15")).await.unwrap();
    run(&repo, "tx add --amount 150 --category entertainment --date 2024-03-02").await.unwrap();
    run(&repo, "tx add --amount 999 --category entertainment --date 2024-03-20").await.unwrap();

    let p = &budgets::progress_rows(&repo).await.unwrap()[0].progress;
    assert_eq!(p.total_spent, Decimal::from(150));
    assert_eq!(p.percentage, 100);
    assert_eq!(p.remaining, Decimal::ZERO);
    assert!(p.over_budget);
}
