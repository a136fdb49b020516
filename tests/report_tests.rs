// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;

use rust_decimal::Decimal;
use trakr::cli::build_cli;
use trakr::commands::{self, reports};
use trakr::report::TimeRange;
use trakr::repo::Repository;
use trakr::store::MemoryStore;

async fn setup() -> Repository {
    let repo = Repository::new(Arc::new(MemoryStore::new()));
    let rows = [
        ("1000", "expense", "food", "2024-03-05", "Credit Card"),
        ("50", "expense", "transportation", "2024-03-08", "Debit Card"),
        ("3500", "income", "salary", "2024-03-01", "Bank Transfer"),
        ("200", "expense", "entertainment", "2024-03-12", "Cash"),
        ("150", "expense", "utilities", "2024-03-15", "Bank Transfer"),
        ("500", "income", "freelance", "2024-03-10", "Bank Transfer"),
        ("800", "expense", "shopping", "2024-03-20", "Credit Card"),
        ("75", "expense", "food", "2023-11-02", "Cash"),
    ];
    for (amount, kind, category, date, method) in rows {
        let m = build_cli().get_matches_from([
            "trakr", "tx", "add", "--amount", amount, "--type", kind, "--category", category,
            "--date", date, "--payment-method", method,
        ]);
        commands::dispatch(&repo, &m).await.unwrap();
    }
    repo
}

fn report_args(args: &[&str]) -> clap::ArgMatches {
    let m = build_cli()
        .get_matches_from(["trakr", "report"].into_iter().chain(args.iter().copied()));
    let (_, report) = m.subcommand().unwrap();
    let (_, sub) = report.subcommand().unwrap();
    sub.clone()
}

#[tokio::test]
async fn summary_covers_everything_by_default() {
    let repo = setup().await;
    let s = reports::summary_for(&repo, &report_args(&["summary"])).await.unwrap();
    assert_eq!(s.total_income, Decimal::from(4000));
    assert_eq!(s.total_expense, Decimal::from(2275));
    assert_eq!(s.balance, Decimal::from(1725));
    assert_eq!(s.most_spent_category.name, "Food & Dining");
    assert_eq!(s.most_spent_category.amount, Decimal::from(1075));
    assert_eq!(s.category_totals.sum(), s.total_expense);
}

#[tokio::test]
async fn summary_over_explicit_window() {
    let repo = setup().await;
    let sub = report_args(&["summary", "--from", "2024-03-06", "--to", "2024-03-15"]);
    let s = reports::summary_for(&repo, &sub).await.unwrap();
    assert_eq!(s.total_income, Decimal::from(500));
    assert_eq!(s.total_expense, Decimal::from(400));
    assert_eq!(s.most_spent_category.name, "Entertainment");
}

#[tokio::test]
async fn relative_range_uses_as_of() {
    let repo = setup().await;
    let all = repo.transactions().await.unwrap();

    let sub = report_args(&["stats", "--range", "7days", "--as-of", "2024-03-21"]);
    let week = reports::select_period(&all, &sub, None).unwrap();
    assert_eq!(week.len(), 2);

    // other reports fall back to 30 days
    let sub = report_args(&["stats", "--as-of", "2024-03-21"]);
    let month = reports::select_period(&all, &sub, Some(TimeRange::default())).unwrap();
    assert_eq!(month.len(), 7);

    let bad = reports::select_period(&all, &report_args(&["stats", "--range", "decade"]), None);
    assert!(bad.is_err());
}

#[tokio::test]
async fn report_subcommands_run() {
    let repo = setup().await;
    for sub in ["summary", "categories", "payment-methods", "income", "cashflow", "stats"] {
        let args = ["trakr", "report", sub, "--as-of", "2024-03-25", "--json"];
        let m = build_cli().get_matches_from(args);
        commands::dispatch(&repo, &m).await.unwrap();
    }
}
