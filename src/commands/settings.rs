// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo::Repository;
use crate::settings::Settings;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub async fn handle(repo: &Repository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = Settings::load(repo).await?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                let rows = vec![
                    vec!["currency".into(), s.currency.clone()],
                    vec!["language".into(), s.language.clone()],
                    vec!["notifications".into(), s.notifications.to_string()],
                    vec!["shame-free".into(), s.shame_free_mode.to_string()],
                    vec!["backup-frequency".into(), s.backup_frequency.clone()],
                    vec!["export-format".into(), s.export_format.as_str().to_string()],
                    vec!["display-name".into(), s.display_name.clone()],
                    vec!["email".into(), s.email.clone()],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let value = sub.get_one::<String>("value").unwrap();
            Settings::set(repo, name, value).await?;
            println!("Set {} = {}", name, value.trim());
        }
        _ => {}
    }
    Ok(())
}
