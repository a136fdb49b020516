// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;

use anyhow::{Context, Result};

use trakr::repo::Repository;
use trakr::store::SqliteStore;
use trakr::{cli, commands, db, utils};

#[tokio::main]
async fn main() -> Result<()> {
    utils::init_tracing();
    let matches = cli::build_cli().get_matches();

    let conn = db::open_or_init()?;
    let store = SqliteStore::new(conn).context("Failed to prepare the record store")?;
    let repo = Repository::new(Arc::new(store));

    if let Some(("init", _)) = matches.subcommand() {
        let records = repo.store().keys().await?.len();
        println!(
            "Database initialized at {} ({} records)",
            db::db_path()?.display(),
            records
        );
        return Ok(());
    }
    if !commands::dispatch(&repo, &matches).await? {
        cli::build_cli().print_help()?;
        println!();
    }
    Ok(())
}
