// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod data;
pub mod exporter;
pub mod reports;
pub mod settings;
pub mod streaks;
pub mod transactions;
pub mod wallets;

use crate::repo::Repository;
use anyhow::Result;

/// Routes one parsed command line to its handler.
pub async fn dispatch(repo: &Repository, matches: &clap::ArgMatches) -> Result<bool> {
    match matches.subcommand() {
        Some(("tx", sub)) => transactions::handle(repo, sub).await?,
        Some(("budget", sub)) => budgets::handle(repo, sub).await?,
        Some(("wallet", sub)) => wallets::handle(repo, sub).await?,
        Some(("category", sub)) => categories::handle(sub)?,
        Some(("report", sub)) => reports::handle(repo, sub).await?,
        Some(("streak", sub)) => streaks::handle(repo, sub).await?,
        Some(("settings", sub)) => settings::handle(repo, sub).await?,
        Some(("export", sub)) => exporter::handle(repo, sub).await?,
        Some(("data", sub)) => data::handle(repo, sub).await?,
        _ => return Ok(false),
    }
    Ok(true)
}
