// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo::{DATA_KEYS, Repository};
use anyhow::Result;
use tracing::warn;

pub async fn handle(repo: &Repository, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("clear", _)) = m.subcommand() {
        // settings keys survive
        for key in DATA_KEYS {
            repo.remove(key).await?;
        }
        warn!("all transactions, budgets, wallets and streaks removed");
        println!("Cleared all data");
    }
    Ok(())
}
